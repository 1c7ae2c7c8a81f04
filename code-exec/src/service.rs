use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::{
    error::Error,
    executor::CodeExecutor,
    sandbox::Sandbox,
    types::{ExecutionOutcome, ResourceLimits},
};

#[derive(Clone)]
pub struct CodeExecutionService {
    executor: Arc<CodeExecutor>,
    semaphore: Arc<Semaphore>,
    resource_limits: ResourceLimits,
}

impl CodeExecutionService {
    /// Python service using the `python3` found on `PATH`
    pub fn new(max_concurrent_executions: usize, resource_limits: ResourceLimits) -> Self {
        Self::with_executor(
            CodeExecutor::python(None),
            max_concurrent_executions,
            resource_limits,
        )
    }

    pub fn with_executor(
        executor: CodeExecutor,
        max_concurrent_executions: usize,
        resource_limits: ResourceLimits,
    ) -> Self {
        Self {
            executor: Arc::new(executor),
            semaphore: Arc::new(Semaphore::new(max_concurrent_executions)),
            resource_limits,
        }
    }

    /// Fail early if the interpreter is not installed
    pub fn check_tools(&self) -> Result<(), Error> {
        self.executor.check_tools()
    }

    /// Run `code` in a fresh sandbox.
    ///
    /// `Ok` covers both outcomes of the submission itself; `Err` means the
    /// sandbox could not be prepared or the interpreter could not be started.
    pub async fn execute(&self, code: &str) -> Result<ExecutionOutcome, Error> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| Error::System(format!("Failed to acquire execution permit: {}", e)))?;

        let sandbox = Sandbox::new(self.resource_limits.clone()).await?;
        debug!("Starting code execution in sandbox {}", sandbox.id());

        let result = self.executor.execute_in_sandbox(code, &sandbox).await;

        match &result {
            Ok(outcome) if outcome.success => {
                info!("Code execution completed successfully in {:?}", outcome.elapsed)
            }
            Ok(outcome) => info!("Submitted code failed after {:?}", outcome.elapsed),
            Err(e) => error!("Code execution failed: {}", e),
        }

        result
    }

    pub fn get_available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}
