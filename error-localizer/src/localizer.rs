use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    error::Error,
    model::GenerativeModel,
    types::{error_analysis_schema, ErrorAnalysis},
};

/// Asks a generative model which source lines a failure trace points at
#[derive(Clone)]
pub struct ErrorLocalizer {
    model: Arc<dyn GenerativeModel>,
}

impl ErrorLocalizer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Return the line numbers the model blames, in the order it gave them.
    ///
    /// Every call reaches the model; nothing is cached. Any failure of the
    /// model call or of parsing its reply is returned to the caller.
    pub async fn localize(&self, code: &str, trace: &str) -> Result<Vec<i64>, Error> {
        let prompt = build_prompt(code, trace);
        let reply = self
            .model
            .generate_json(&prompt, &error_analysis_schema())
            .await?;
        debug!("Model reply: {}", reply);

        let analysis: ErrorAnalysis = serde_json::from_str(&reply)?;
        info!("Model located error at lines {:?}", analysis.error_lines);
        Ok(analysis.error_lines)
    }
}

pub fn build_prompt(code: &str, trace: &str) -> String {
    format!(
        r#"
Analyze this Python code and its error traceback.
Identify the exact line number(s) where the error occurred.

CODE:
{code}

TRACEBACK:
{trace}

Return ONLY JSON in this format:
{{ "error_lines": [line_numbers] }}
"#
    )
}
