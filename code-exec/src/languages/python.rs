use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::{error::Error, executor::LanguageExecutor, languages::ToolCheck, sandbox::Sandbox};

const SOURCE_FILE: &str = "main.py";
const BOOTSTRAP_FILE: &str = "bootstrap.py";
const TRACE_FILE: &str = ".trace";

/// Compiles `main.py` under the name `<string>` and reports failures through
/// `.trace`, so stderr written by the program never ends up in the trace.
const BOOTSTRAP: &str = include_str!("bootstrap.py");

pub struct PythonExecutor {
    interpreter: String,
}

impl PythonExecutor {
    pub fn new(interpreter: Option<String>) -> Self {
        Self {
            interpreter: interpreter.unwrap_or_else(|| "python3".to_string()),
        }
    }
}

impl ToolCheck for PythonExecutor {
    fn required_tools(&self) -> Vec<&str> {
        vec![self.interpreter.as_str()]
    }
}

#[async_trait]
impl LanguageExecutor for PythonExecutor {
    fn run_command(&self) -> &str {
        &self.interpreter
    }

    fn run_args(&self) -> Vec<String> {
        // -I: isolated mode, ignores PYTHON* variables and the user site directory
        // -B: no .pyc files in the sandbox
        vec!["-I".to_string(), "-B".to_string(), BOOTSTRAP_FILE.to_string()]
    }

    async fn write_source(&self, sandbox: &Sandbox, code: &str) -> Result<PathBuf, Error> {
        sandbox.write_file(BOOTSTRAP_FILE, BOOTSTRAP).await?;
        let path = sandbox.write_file(SOURCE_FILE, code).await?;
        debug!("Wrote source file to: {}", path.display());
        Ok(path)
    }

    fn trace_file(&self) -> Option<&str> {
        Some(TRACE_FILE)
    }

    fn check_tools(&self) -> Result<(), Error> {
        ToolCheck::check_tools(self)
    }
}
