use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Structured reply expected from the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    pub error_lines: Vec<i64>,
}

/// Response schema constraining the model to `{ "error_lines": [int, ...] }`.
///
/// Uses the OpenAPI subset understood by `generationConfig.responseSchema`.
pub fn error_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "error_lines": {
                "type": "ARRAY",
                "items": { "type": "INTEGER" }
            }
        },
        "required": ["error_lines"]
    })
}
