use thiserror::Error;

/// Infrastructure failures of the executor.
///
/// A submission that raises, crashes or times out is not an error here; it
/// comes back as an unsuccessful [`ExecutionOutcome`](crate::ExecutionOutcome).
#[derive(Error, Debug)]
pub enum Error {
    #[error("System error: {0}")]
    System(String),

    #[error("Sandbox error: {0}")]
    Sandbox(String),

    #[error("Missing required tools: {0}")]
    MissingTools(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
