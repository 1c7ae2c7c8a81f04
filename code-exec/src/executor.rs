use async_trait::async_trait;
use std::{path::PathBuf, process::ExitStatus};
use tracing::debug;

use crate::{
    error::Error,
    languages::PythonExecutor,
    sandbox::{Completion, Sandbox},
    types::ExecutionOutcome,
};

/// Trait for language-specific code executors
#[async_trait]
pub trait LanguageExecutor: Send + Sync {
    /// Get the command to run the code
    fn run_command(&self) -> &str;

    /// Get additional arguments for the run command
    fn run_args(&self) -> Vec<String> {
        Vec::new()
    }

    /// Place the submitted source where the run command expects it
    async fn write_source(&self, sandbox: &Sandbox, code: &str) -> Result<PathBuf, Error>;

    /// Sandbox file the runtime writes its failure trace to, if it keeps one
    /// apart from stderr. Without one, stderr is the trace.
    fn trace_file(&self) -> Option<&str> {
        None
    }

    /// Check if all required tools are available
    fn check_tools(&self) -> Result<(), Error>;
}

/// Generic code executor that uses a sandbox
pub struct CodeExecutor {
    language: Box<dyn LanguageExecutor>,
}

impl CodeExecutor {
    /// Create an executor for Python using the given interpreter (defaults to `python3`)
    pub fn python(interpreter: Option<String>) -> Self {
        Self::new(Box::new(PythonExecutor::new(interpreter)))
    }

    pub fn new(language: Box<dyn LanguageExecutor>) -> Self {
        Self { language }
    }

    pub fn check_tools(&self) -> Result<(), Error> {
        self.language.check_tools()
    }

    /// Execute code in a specific sandbox
    pub async fn execute_in_sandbox(
        &self,
        code: &str,
        sandbox: &Sandbox,
    ) -> Result<ExecutionOutcome, Error> {
        self.language.write_source(sandbox, code).await?;

        let args = self.language.run_args();
        let completion = sandbox
            .execute(
                self.language.run_command(),
                &args.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )
            .await?;

        Ok(match completion {
            Completion::Finished { output, elapsed } if output.status.success() => {
                debug!("Sandbox {} finished in {:?}", sandbox.id(), elapsed);
                ExecutionOutcome::success(String::from_utf8_lossy(&output.stdout).into_owned(), elapsed)
            }
            Completion::Finished { output, elapsed } => {
                debug!(
                    "Sandbox {} failed with {} in {:?}",
                    sandbox.id(),
                    output.status,
                    elapsed
                );
                let trace = match self.language.trace_file() {
                    Some(name) => sandbox.read_file(name).await?.unwrap_or_default(),
                    None => String::from_utf8_lossy(&output.stderr).into_owned(),
                };
                let trace = if trace.trim().is_empty() {
                    describe_exit(output.status)
                } else {
                    trace
                };
                ExecutionOutcome::failure(trace, elapsed)
            }
            Completion::TimedOut { elapsed } => ExecutionOutcome::failure(
                format!(
                    "TimeoutError: execution exceeded {:?}\n",
                    sandbox.limits().wall_time
                ),
                elapsed,
            ),
        })
    }
}

/// Diagnostic for a process that failed without leaving a trace
fn describe_exit(status: ExitStatus) -> String {
    #[cfg(unix)]
    {
        use nix::sys::signal::Signal;
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return match Signal::try_from(signal) {
                Ok(Signal::SIGXCPU) => "ResourceError: CPU time limit exceeded\n".to_string(),
                Ok(sig) => format!("Process terminated by signal {}\n", sig.as_str()),
                Err(_) => format!("Process terminated by signal {}\n", signal),
            };
        }
    }

    match status.code() {
        Some(code) => format!("Process exited with status {}\n", code),
        None => format!("Process exited abnormally: {}\n", status),
    }
}
