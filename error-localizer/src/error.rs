use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Model returned no content: {0}")]
    EmptyResponse(String),

    #[error("Model reply does not match the error analysis schema: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl Error {
    /// True when the failure comes from local setup rather than the remote service
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::MissingEnvVar(_))
    }
}
