use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};
use crate::{Error, Invocation, Result, RunnerConfig, STDERR_TAIL_BYTES};

/// Runs external analysis processes, bounded by a shared permit pool.
///
/// One runner is created at start-up and shared by every request handler.
/// Each request holds a permit for the lifetime of its child process.
#[derive(Clone)]
pub struct ProcessRunner {
    permits: Arc<Semaphore>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(max_concurrent: usize, timeout: Option<Duration>) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            timeout,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.max_concurrent, config.timeout)
    }

    /// Runs the invocation to completion. Any non-zero exit is an error.
    pub async fn run(&self, invocation: &Invocation) -> Result<()> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| Error::Other(format!("Process pool closed: {}", e)))?;

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let child = command.spawn().map_err(|e| {
            error!("Failed to spawn {}: {}", invocation.program, e);
            Error::Process(format!("failed to start {}: {}", invocation.program, e))
        })?;

        debug!("Spawned {} (pid {:?})", invocation.program, child.id());

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    error!("{} exceeded {:?}; killed", invocation.program, limit);
                    Error::Timeout(limit.as_secs())
                })??,
            None => child.wait_with_output().await?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{} stdout:\n{}", invocation.program, stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = stderr_tail(&output.stderr);
            error!(
                "{} exited with {} after {:.1}s: {}",
                invocation.program,
                describe_status(output.status),
                started.elapsed().as_secs_f64(),
                stderr
            );
            return Err(Error::Process(format!(
                "{} exited with {}: {}",
                invocation.program,
                describe_status(output.status),
                stderr
            )));
        }

        info!(
            "{} finished in {:.1}s",
            invocation.program,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("status {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Last `STDERR_TAIL_BYTES` of a child's stderr, trimmed.
pub fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= STDERR_TAIL_BYTES {
        return text.to_string();
    }

    let mut start = text.len() - STDERR_TAIL_BYTES;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
