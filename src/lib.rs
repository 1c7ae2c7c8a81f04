//! # Code Interpreter
//!
//! HTTP front end that runs submitted Python code and, when it fails, asks a
//! generative-AI model which lines caused the failure.
//!
//! `POST /code-interpreter` takes `{ "code": "..." }` and answers with
//! `{ "error": [line, ...], "result": "..." }`. On success `error` is empty
//! and `result` is the captured stdout; on failure `result` is the traceback
//! and `error` holds the lines reported by the model.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use code_exec::CodeExecutionService;
use error_localizer::ErrorLocalizer;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Failures that prevent a `CodeResponse` from being produced.
///
/// Submitted code that raises is not one of these. Executor infrastructure
/// and model failures are kept apart so callers can tell them apart by status.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Execution error: {0}")]
    Execution(#[from] code_exec::Error),
    #[error("Localization error: {0}")]
    Localization(#[from] error_localizer::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("{}", self);

        let (status, detail) = match &self {
            ServerError::Execution(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "code execution unavailable",
            ),
            ServerError::Localization(e) if e.is_configuration() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "error localization is not configured",
            ),
            ServerError::Localization(_) => (StatusCode::BAD_GATEWAY, "error localization failed"),
            ServerError::ServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeResponse {
    pub error: Vec<i64>,
    pub result: String,
}

#[derive(Clone)]
pub struct AppState {
    service: Arc<CodeExecutionService>,
    localizer: Arc<ErrorLocalizer>,
}

pub fn create_app(service: CodeExecutionService, localizer: ErrorLocalizer) -> Router {
    let state = AppState {
        service: Arc::new(service),
        localizer: Arc::new(localizer),
    };

    let cors = CorsLayer::permissive();

    Router::new()
        .route("/code-interpreter", post(code_interpreter))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting code interpreter on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn code_interpreter(
    State(state): State<AppState>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<CodeResponse>, ServerError> {
    let execution = state.service.execute(&request.code).await?;

    // The model is only consulted for failed runs
    if execution.success {
        return Ok(Json(CodeResponse {
            error: vec![],
            result: execution.output,
        }));
    }

    let error_lines = state
        .localizer
        .localize(&request.code, &execution.output)
        .await?;

    Ok(Json(CodeResponse {
        error: error_lines,
        result: execution.output,
    }))
}
