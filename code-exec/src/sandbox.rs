use crate::{error::Error, types::ResourceLimits};
use nix::{
    sys::{
        resource::{setrlimit, Resource},
        signal::{killpg, Signal},
    },
    unistd::Pid,
};
use std::{
    path::PathBuf,
    process::{Output, Stdio},
    time::Instant,
};
use tokio::{
    fs,
    io::{AsyncRead, AsyncReadExt},
    process::Command,
    sync::oneshot,
    task::JoinHandle,
    time::{self, Duration},
};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// How long a pipe may stay open after its process group was killed
const PIPE_DRAIN_GRACE: Duration = Duration::from_millis(200);

/// How a sandboxed process came to an end
#[derive(Debug)]
pub enum Completion {
    /// The process exited (normally or through a signal) before the deadline
    Finished { output: Output, elapsed: Duration },
    /// The deadline passed and the process was killed
    TimedOut { elapsed: Duration },
}

/// Private working area for one execution.
///
/// Each sandbox owns its directory and the pipes of the process it spawns, so
/// two sandboxes running side by side never share an output stream.
pub struct Sandbox {
    /// Root directory for the sandbox
    pub root_dir: PathBuf,
    /// Resource limits
    limits: ResourceLimits,
    /// Unique ID for this sandbox instance
    id: String,
}

/// Collects one pipe in the background until EOF or until told to stop
struct PipeReader {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl PipeReader {
    fn spawn<R>(mut pipe: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 8192];
            loop {
                tokio::select! {
                    read = pipe.read(&mut chunk) => match read? {
                        0 => break,
                        n => buf.extend_from_slice(&chunk[..n]),
                    },
                    _ = &mut stopped => break,
                }
            }
            Ok::<_, std::io::Error>(buf)
        });
        Self { stop, handle }
    }

    /// Return what was read, giving the pipe `grace` to reach EOF first.
    ///
    /// A descendant that escaped the process group can hold the pipe open
    /// indefinitely; after the grace period reading stops regardless.
    async fn finish(self, grace: Duration) -> Result<Vec<u8>, Error> {
        let PipeReader { stop, mut handle } = self;
        let joined = match time::timeout(grace, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!("Pipe still open after the process exited; truncating output");
                let _ = stop.send(());
                handle.await
            }
        };
        joined
            .map_err(|e| Error::Sandbox(format!("Output reader failed: {}", e)))?
            .map_err(|e| Error::Sandbox(format!("Failed to read output: {}", e)))
    }
}

impl Sandbox {
    /// Create a new sandbox environment
    pub async fn new(limits: ResourceLimits) -> Result<Self, Error> {
        let id = Uuid::new_v4().to_string();
        let root_dir = std::env::temp_dir().join(format!("sandbox-{}", id));

        fs::create_dir_all(root_dir.join("home"))
            .await
            .map_err(|e| Error::Sandbox(format!("Failed to create sandbox directory: {}", e)))?;

        Ok(Sandbox {
            root_dir,
            limits,
            id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Write a file into the sandbox root and return its path
    pub async fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, Error> {
        let path = self.root_dir.join(name);
        fs::write(&path, contents).await?;
        Ok(path)
    }

    /// Read a file from the sandbox root, `None` if it does not exist
    pub async fn read_file(&self, name: &str) -> Result<Option<String>, Error> {
        match fs::read(self.root_dir.join(name)).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Run a command inside the sandbox with resource limits and a wall-clock deadline.
    ///
    /// The command leads its own process group. Completion is decided by the
    /// command's exit, not by its pipes closing; once it exits or the deadline
    /// passes, the whole group is killed so no descendant outlives the call.
    pub async fn execute(&self, cmd: &str, args: &[&str]) -> Result<Completion, Error> {
        let start_time = Instant::now();

        debug!("Sandbox {} execute - Command: {}", self.id, cmd);
        debug!("Sandbox {} execute - Args: {:?}", self.id, args);

        let cmd_path = if cmd.contains('/') {
            PathBuf::from(cmd)
        } else {
            which::which(cmd).map_err(|_| Error::Sandbox(format!("Command not found: {}", cmd)))?
        };

        let mut command = Command::new(&cmd_path);
        command
            .args(args)
            .env_clear()
            .env("PATH", "/usr/local/bin:/usr/bin:/bin")
            .env("HOME", self.root_dir.join("home"))
            .env("LANG", "C.UTF-8")
            .current_dir(&self.root_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true);

        let file_size = self.limits.file_size;
        let cpu_time = u64::from(self.limits.cpu_time);
        #[cfg(target_os = "linux")]
        let memory = self.limits.memory;

        // SAFETY: the closure only calls setrlimit, which is async-signal-safe.
        unsafe {
            command.pre_exec(move || {
                setrlimit(Resource::RLIMIT_CPU, cpu_time, cpu_time)?;
                setrlimit(Resource::RLIMIT_FSIZE, file_size, file_size)?;
                // Address-space limits are not enforced on macOS
                #[cfg(target_os = "linux")]
                setrlimit(Resource::RLIMIT_AS, memory, memory)?;
                Ok(())
            });
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::Sandbox(format!("Failed to spawn process: {}", e)))?;

        // process_group(0) makes the child's pid its group id
        let group = child.id().map(|id| Pid::from_raw(id as i32));
        let stdout = child
            .stdout
            .take()
            .map(PipeReader::spawn)
            .ok_or_else(|| Error::Sandbox("stdout was not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .map(PipeReader::spawn)
            .ok_or_else(|| Error::Sandbox("stderr was not captured".into()))?;

        let waited = time::timeout(self.limits.wall_time, child.wait()).await;

        if let Some(group) = group {
            // ESRCH just means nothing in the group is left
            let _ = killpg(group, Signal::SIGKILL);
        }

        match waited {
            Ok(Ok(status)) => {
                let elapsed = start_time.elapsed();
                let stdout = stdout.finish(PIPE_DRAIN_GRACE).await?;
                let stderr = stderr.finish(PIPE_DRAIN_GRACE).await?;
                Ok(Completion::Finished {
                    output: Output {
                        status,
                        stdout,
                        stderr,
                    },
                    elapsed,
                })
            }
            Ok(Err(e)) => Err(Error::Sandbox(format!("Process error: {}", e))),
            Err(_) => {
                let elapsed = start_time.elapsed();
                debug!(
                    "Sandbox {} killed after {:?}",
                    self.id, self.limits.wall_time
                );
                // Reap the killed leader; its output is discarded
                let _ = child.kill().await;
                let _ = stdout.finish(PIPE_DRAIN_GRACE).await;
                let _ = stderr.finish(PIPE_DRAIN_GRACE).await;
                Ok(Completion::TimedOut { elapsed })
            }
        }
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.root_dir) {
            error!("Failed to clean up sandbox directory: {}", e);
        }
    }
}
