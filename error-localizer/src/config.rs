use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API
    pub api_url: String,

    /// Model identifier, e.g. `gemini-2.0-flash-exp`
    pub model: String,

    /// Name of the environment variable holding the API key.
    /// The variable is read on every request, not at construction.
    pub api_key_env: String,

    /// Upper bound for one generateContent round trip
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_api_key_env(mut self, api_key_env: String) -> Self {
        self.api_key_env = api_key_env;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the API key from the process environment
    pub fn api_key(&self) -> Result<String, Error> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::MissingEnvVar(self.api_key_env.clone())),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.model.trim().is_empty() {
            return Err(Error::Configuration("model must not be empty".into()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(Error::Configuration(
                "API key variable name must not be empty".into(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(Error::Configuration(format!(
                "API URL must be http(s): {}",
                self.api_url
            )));
        }
        Ok(())
    }
}
