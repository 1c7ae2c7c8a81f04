use super::run_python;
use crate::{
    tests::{
        fixtures::{code_samples::*, failing_code::*, test_scenarios::*},
        utils::defaults::{default_test_limits, no_python, short_timeout},
    },
    CodeExecutionService, Result, ResourceLimits,
};

#[tokio::test]
async fn test_python_hello() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_HELLO).await?;
    assert!(outcome.success);
    assert_eq!(outcome.output, "hello\n");
    Ok(())
}

#[tokio::test]
async fn test_python_empty_code() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python("").await?;
    assert!(outcome.success);
    assert_eq!(outcome.output, "");
    Ok(())
}

#[tokio::test]
async fn test_python_no_output() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_SILENT).await?;
    assert!(outcome.success);
    assert!(outcome.output.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_python_multiline() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_MULTILINE).await?;
    assert!(outcome.success);
    assert_eq!(outcome.output, "Factorial of 5 is 120\n");
    Ok(())
}

#[tokio::test]
async fn test_python_unicode_output() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_UNICODE).await?;
    assert!(outcome.success);
    assert_eq!(outcome.output, "héllo wörld ✓\n");
    Ok(())
}

#[tokio::test]
async fn test_python_zero_division_trace() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_ZERO_DIVISION).await?;
    assert!(!outcome.success);
    assert!(outcome.output.starts_with("Traceback (most recent call last):"));
    assert!(outcome.output.contains("File \"<string>\", line 1, in <module>"));
    assert!(outcome.output.contains("ZeroDivisionError: division by zero"));
    Ok(())
}

#[tokio::test]
async fn test_python_name_error_points_at_line() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_NAME_ERROR).await?;
    assert!(!outcome.success);
    assert!(outcome.output.contains("File \"<string>\", line 3"));
    assert!(outcome.output.contains("NameError"));
    // Source lines are quoted from the submission
    assert!(outcome.output.contains("print(a + c)"));
    Ok(())
}

#[tokio::test]
async fn test_python_syntax_error() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_SYNTAX_ERROR).await?;
    assert!(!outcome.success);
    assert!(outcome.output.contains("SyntaxError"));
    Ok(())
}

#[tokio::test]
async fn test_python_failure_reports_trace_only() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_PARTIAL_OUTPUT).await?;
    assert!(!outcome.success);
    assert!(outcome.output.contains("ValueError: boom"));
    assert!(!outcome.output.contains("before"));
    Ok(())
}

#[tokio::test]
async fn test_python_nonzero_exit_without_trace() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_EXIT_CODE).await?;
    assert!(!outcome.success);
    assert_eq!(outcome.output, "Process exited with status 3\n");
    Ok(())
}

#[tokio::test]
async fn test_python_stdin_is_empty() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_READS_STDIN).await?;
    assert!(!outcome.success);
    assert!(outcome.output.contains("EOFError"));
    Ok(())
}

#[tokio::test]
async fn test_python_timeout_is_a_failed_outcome() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let limits = ResourceLimits {
        wall_time: short_timeout(),
        ..default_test_limits()
    };
    let service = CodeExecutionService::new(1, limits);
    let outcome = service.execute(PYTHON_SLEEP).await?;
    assert!(!outcome.success);
    assert!(outcome.output.starts_with("TimeoutError: execution exceeded"));
    assert!(outcome.elapsed.as_secs() < 5);
    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_python_memory_limit() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_MEMORY_HOG).await?;
    assert!(!outcome.success);
    assert!(outcome.output.contains("MemoryError"));
    Ok(())
}

#[tokio::test]
async fn test_python_stderr_is_not_part_of_the_trace() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_STDERR_THEN_RAISE).await?;
    assert!(!outcome.success);
    assert!(outcome.output.starts_with("Traceback (most recent call last):"));
    assert!(outcome.output.contains("ZeroDivisionError"));
    assert!(!outcome.output.contains("noise"));
    Ok(())
}

#[tokio::test]
async fn test_python_trace_hides_sandbox_paths() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let outcome = run_python(PYTHON_ZERO_DIVISION).await?;
    assert!(!outcome.output.contains("sandbox-"));
    assert!(!outcome.output.contains("bootstrap.py"));
    assert!(!outcome.output.contains("main.py"));
    Ok(())
}

#[tokio::test]
async fn test_python_background_child_does_not_hold_the_run() -> Result<()> {
    if no_python() {
        return Ok(());
    }
    let limits = ResourceLimits {
        wall_time: std::time::Duration::from_secs(2),
        ..default_test_limits()
    };
    let service = CodeExecutionService::new(1, limits);
    let outcome = service.execute(PYTHON_BACKGROUND_CHILD).await?;

    assert!(outcome.success, "unexpected failure: {}", outcome.output);
    assert!(outcome.elapsed.as_secs() < 2);

    #[cfg(target_os = "linux")]
    {
        let pid: u32 = outcome.output.trim().parse().expect("child pid");
        assert!(process_gone(pid).await, "background child {} outlived the run", pid);
    }
    Ok(())
}

/// True once `pid` no longer exists or is only a zombie awaiting its reaper
#[cfg(target_os = "linux")]
async fn process_gone(pid: u32) -> bool {
    for _ in 0..50 {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Err(_) => return true,
            // Format: "pid (comm) state ..."
            Ok(stat) => {
                let state = stat.rsplit(')').next().and_then(|rest| rest.split_whitespace().next());
                if state == Some("Z") {
                    return true;
                }
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    false
}
