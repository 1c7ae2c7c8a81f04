use std::time::Duration;

/// Result of running one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Whether the program ran to completion without raising
    pub success: bool,
    /// Captured stdout on success, the rendered failure trace otherwise
    pub output: String,
    /// Wall-clock time spent in the interpreter
    pub elapsed: Duration,
}

impl ExecutionOutcome {
    pub fn success(output: String, elapsed: Duration) -> Self {
        Self {
            success: true,
            output,
            elapsed,
        }
    }

    pub fn failure(output: String, elapsed: Duration) -> Self {
        Self {
            success: false,
            output,
            elapsed,
        }
    }
}

/// Resource limits for code execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum CPU time (seconds)
    pub cpu_time: u32,
    /// Maximum address space (bytes)
    pub memory: u64,
    /// Maximum file size (bytes)
    pub file_size: u64,
    /// Wall-clock limit after which the child is killed
    pub wall_time: Duration,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu_time: 10,
            memory: 512 * 1024 * 1024,   // 512MB
            file_size: 10 * 1024 * 1024, // 10MB
            wall_time: Duration::from_secs(10),
        }
    }
}
