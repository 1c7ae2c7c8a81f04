//! # Error Localizer
//!
//! Sends a program and its failure trace to a generative-AI model and reads
//! back the line numbers the model blames.
//!
//! The model sits behind the [`GenerativeModel`] trait; [`GeminiClient`] is
//! the bundled implementation for Google's Generative Language API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use error_localizer::{ErrorLocalizer, GeminiClient, GeminiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY when the request is made
//!     let client = GeminiClient::new(GeminiConfig::new())?;
//!     let localizer = ErrorLocalizer::new(Arc::new(client));
//!
//!     let trace = "Traceback (most recent call last):\n  File \"<string>\", line 1, in <module>\nZeroDivisionError: division by zero\n";
//!     let lines = localizer.localize("print(1/0)", trace).await?;
//!     println!("error at lines {:?}", lines);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod localizer;
mod model;
mod types;

pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_API_KEY_ENV, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::Error;
pub use localizer::{build_prompt, ErrorLocalizer};
pub use model::GenerativeModel;
pub use types::{error_analysis_schema, ErrorAnalysis};

/// Result type for localization operations
pub type Result<T> = std::result::Result<T, Error>;
