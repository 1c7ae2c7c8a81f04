use super::utils::defaults::*;
use crate::{CodeExecutionService, ExecutionOutcome, Result};

pub mod python;

pub(crate) async fn run_python(code: &str) -> Result<ExecutionOutcome> {
    let service = CodeExecutionService::new(1, default_test_limits());
    service.execute(code).await
}
