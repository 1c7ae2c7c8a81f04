use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;

/// A text-generation service that can be constrained to a JSON schema.
///
/// Implementations return the raw JSON text of the reply; callers parse it.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, Error>;
}
