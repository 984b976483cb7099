//! Oracle Invoker
//!
//! Runs the external estimator as a subprocess, one invocation per trial.
//! The invoker blocks until the child exits or a bounded per-trial timeout
//! expires; on expiry the child is killed and the trial is reported as a
//! failed `RawTrialResult`, not an error.

use crate::record::{ContractUnit, RawTrialResult};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Interval between liveness checks while waiting for the estimator.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Errors raised by the invoker itself.
///
/// A non-zero exit of the estimator is not an `InvokeError`; it is carried
/// inside the returned `RawTrialResult`.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The estimator process could not be started
    #[error("failed to spawn estimator '{program}': {source}")]
    SpawnFailed {
        /// Program that failed to start
        program: String,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Waiting on the estimator process failed at the OS level
    #[error("failed to wait on estimator: {0}")]
    WaitFailed(#[from] std::io::Error),
}

/// Boundary to the external estimation oracle.
///
/// Implementations run one trial per call; repeated calls are independent
/// trials with no shared state, though the estimator's own output may vary
/// between calls (live gas and price feeds).
pub trait OracleInvoker {
    /// Execute the estimator once for the given contract and capture the
    /// outcome.
    fn invoke(&self, unit: &ContractUnit) -> Result<RawTrialResult, InvokeError>;
}

/// Invoker that spawns a configured command with the contract path as its
/// sole positional input.
///
/// The default configuration runs `node <script> <contract-path>`, matching
/// the estimator scripts solcost was built against.
#[derive(Debug, Clone)]
pub struct CommandInvoker {
    program: String,
    script: Option<PathBuf>,
    timeout: Duration,
}

impl CommandInvoker {
    /// Create an invoker for `program [script] <contract-path>`.
    pub fn new(program: impl Into<String>, script: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            script,
            timeout,
        }
    }

    /// Human-readable command line, for report metadata and logs.
    pub fn command_line(&self) -> String {
        match &self.script {
            Some(script) => format!("{} {}", self.program, script.display()),
            None => self.program.clone(),
        }
    }

    /// Wait for the child within the timeout, killing it on expiry.
    ///
    /// Returns `Ok(None)` when the deadline passed and the child was killed.
    fn wait_with_deadline(&self, child: &mut Child) -> Result<Option<std::process::ExitStatus>, InvokeError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl OracleInvoker for CommandInvoker {
    fn invoke(&self, unit: &ContractUnit) -> Result<RawTrialResult, InvokeError> {
        let mut command = Command::new(&self.program);
        if let Some(script) = &self.script {
            command.arg(script);
        }
        command
            .arg(&unit.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| InvokeError::SpawnFailed {
            program: self.program.clone(),
            source,
        })?;

        // Drain both streams off-thread so a chatty estimator cannot
        // deadlock against a full pipe buffer while we poll for exit.
        let stdout_handle = child.stdout.take().map(spawn_drain);
        let stderr_handle = child.stderr.take().map(spawn_drain);

        let status = self.wait_with_deadline(&mut child)?;

        let stdout = join_drain(stdout_handle);
        let stderr = join_drain(stderr_handle);

        match status {
            Some(status) => Ok(RawTrialResult {
                success: status.success(),
                exit_code: status.code(),
                stdout,
                stderr,
            }),
            None => Ok(RawTrialResult {
                success: false,
                exit_code: None,
                stdout,
                stderr: format!(
                    "estimator timed out after {:.1}s and was killed",
                    self.timeout.as_secs_f64()
                ),
            }),
        }
    }
}

fn spawn_drain<R: Read + Send + 'static>(mut stream: R) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_drain(handle: Option<std::thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &std::path::Path, body: &str) -> PathBuf {
        let path = dir.join("oracle.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "{}", body).unwrap();
        let mut perms = file.metadata().unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn unit() -> ContractUnit {
        ContractUnit::from_path(PathBuf::from("/tmp/A.sol"))
    }

    #[test]
    fn captures_stdout_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), r#"echo "Estimated Gas Units: 21000""#);
        let invoker = CommandInvoker::new(
            script.to_string_lossy().into_owned(),
            None,
            Duration::from_secs(10),
        );

        let result = invoker.invoke(&unit()).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("Estimated Gas Units: 21000"));
    }

    #[test]
    fn nonzero_exit_is_data_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo compile failed >&2; exit 3");
        let invoker = CommandInvoker::new(
            script.to_string_lossy().into_owned(),
            None,
            Duration::from_secs(10),
        );

        let result = invoker.invoke(&unit()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("compile failed"));
    }

    #[test]
    fn timeout_kills_child_and_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "sleep 30");
        let invoker = CommandInvoker::new(
            script.to_string_lossy().into_owned(),
            None,
            Duration::from_millis(200),
        );

        let start = Instant::now();
        let result = invoker.invoke(&unit()).unwrap();
        assert!(start.elapsed() < Duration::from_secs(10));
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert!(result.stderr.contains("timed out"));
    }

    #[test]
    fn spawn_failure_is_an_invoke_error() {
        let invoker = CommandInvoker::new(
            "/nonexistent/solcost-oracle-binary",
            None,
            Duration::from_secs(1),
        );
        let err = invoker.invoke(&unit()).unwrap_err();
        assert!(matches!(err, InvokeError::SpawnFailed { .. }));
    }

    #[test]
    fn command_line_includes_script() {
        let invoker = CommandInvoker::new(
            "node",
            Some(PathBuf::from("estimateBytesize.js")),
            Duration::from_secs(60),
        );
        assert_eq!(invoker.command_line(), "node estimateBytesize.js");
    }
}
