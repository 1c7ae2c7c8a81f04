use clap::Parser;
use code_exec::{CodeExecutionService, CodeExecutor, ResourceLimits};
use code_interpreter::{create_app, run_server};
use error_localizer::{
    ErrorLocalizer, GeminiClient, GeminiConfig, DEFAULT_API_KEY_ENV, DEFAULT_API_URL,
    DEFAULT_MODEL,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// Maximum number of concurrent executions
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    max_concurrent: u32,

    /// Python interpreter used to run submissions
    #[arg(long, default_value = "python3")]
    python: String,

    /// Wall-clock limit per execution in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// CPU time limit in seconds
    #[arg(long, default_value = "10")]
    cpu_time_limit: u32,

    /// Memory limit in bytes
    #[arg(long, default_value = "536870912")] // 512MB
    memory_limit: u64,

    /// File size limit in bytes
    #[arg(long, default_value = "10485760")] // 10MB
    file_size_limit: u64,

    /// Model used for error localization
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Generative Language API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Environment variable holding the API key
    #[arg(long, default_value = DEFAULT_API_KEY_ENV)]
    api_key_env: String,

    /// Timeout for one model request in seconds
    #[arg(long, default_value = "30")]
    ai_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let resource_limits = ResourceLimits {
        cpu_time: args.cpu_time_limit,
        memory: args.memory_limit,
        file_size: args.file_size_limit,
        wall_time: Duration::from_secs(args.timeout),
    };

    let service = CodeExecutionService::with_executor(
        CodeExecutor::python(Some(args.python)),
        args.max_concurrent as usize,
        resource_limits,
    );
    service.check_tools()?;

    let gemini_config = GeminiConfig::new()
        .with_api_url(args.api_url)
        .with_model(args.model)
        .with_api_key_env(args.api_key_env)
        .with_timeout(Duration::from_secs(args.ai_timeout));

    // The key is read per request; a missing one only fails localization calls
    if let Err(e) = gemini_config.api_key() {
        warn!("{}; failed executions will not be localized", e);
    }
    info!("Localizing errors with model {}", gemini_config.model);

    let localizer = ErrorLocalizer::new(Arc::new(GeminiClient::new(gemini_config)?));

    let app = create_app(service, localizer);
    run_server(app, args.addr).await?;

    Ok(())
}
