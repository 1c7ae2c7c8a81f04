//! # Code Execution Service
//!
//! Runs submitted Python source in a fresh interpreter process per call.
//! Output is captured through pipes owned by that call, so concurrent
//! executions never observe each other's stdout.

mod error;
mod executor;
mod languages;
mod sandbox;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use executor::{CodeExecutor, LanguageExecutor};
pub use languages::PythonExecutor;
pub use sandbox::{Completion, Sandbox};
pub use service::CodeExecutionService;
pub use types::{ExecutionOutcome, ResourceLimits};

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;
