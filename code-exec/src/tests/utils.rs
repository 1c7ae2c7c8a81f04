pub mod defaults {
    use crate::{languages::skip_if_not_available, ResourceLimits};
    use tokio::time::Duration;

    pub fn default_test_limits() -> ResourceLimits {
        #[cfg(target_os = "linux")]
        {
            ResourceLimits {
                memory: 256 * 1024 * 1024, // 256MB
                cpu_time: 5,               // 5 seconds
                file_size: 10 * 1024 * 1024, // 10MB
                wall_time: default_timeout(),
            }
        }

        #[cfg(not(target_os = "linux"))]
        {
            ResourceLimits {
                memory: u64::MAX, // Address-space limits not enforced outside Linux
                cpu_time: 5,
                file_size: 10 * 1024 * 1024,
                wall_time: default_timeout(),
            }
        }
    }

    pub fn default_timeout() -> Duration {
        Duration::from_secs(5)
    }

    pub fn short_timeout() -> Duration {
        Duration::from_millis(500)
    }

    /// True when the test should bail out because no interpreter is installed
    pub fn no_python() -> bool {
        skip_if_not_available(&["python3"])
    }
}
