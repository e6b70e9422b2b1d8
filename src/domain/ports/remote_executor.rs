//! Remote executor port - the transport every remote effect goes through.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::domain::services::shell;
use crate::error::{HoistError, HoistResult};

/// Outcome of one remote invocation. Inspected by the caller, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommandResult {
    pub status: i32,
    /// stdout followed by stderr
    pub output: String,
}

impl RemoteCommandResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            status: 0,
            output: output.into(),
        }
    }

    pub fn failed(status: i32, output: impl Into<String>) -> Self {
        Self {
            status,
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Transport-level failure: the command never got a verdict from the host.
#[derive(Debug)]
pub enum ExecError {
    /// Unreachable, auth failure, or host key rejected
    Connectivity(String),
    /// The invocation ran past its deadline and was killed
    Timeout(Duration),
    /// ssh/scp/rsync could not be started locally
    Spawn(std::io::Error),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Connectivity(msg) => write!(f, "{msg}"),
            ExecError::Timeout(after) => write!(f, "remote command timed out after {after:?}"),
            ExecError::Spawn(err) => write!(f, "failed to start ssh client: {err}"),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

/// Runs commands on, and copies files to, one remote host.
///
/// Implementations:
/// - `SshExecutor` - OpenSSH client binaries
/// - test doubles in `application::testing`
pub trait RemoteExecutor {
    /// `user@host`, for diagnostics
    fn destination(&self) -> &str;

    /// Run a one-line command or a multi-line script in a single session.
    fn execute(&self, script: &str) -> Result<RemoteCommandResult, ExecError>;

    /// Copy one local file to `remote_path`. A copy that reached the host but
    /// failed there comes back as a non-zero status, not an `ExecError`.
    fn upload(&self, local: &Path, remote_path: &str) -> Result<RemoteCommandResult, ExecError>;

    /// Make `remote_dir` an exact copy of `local_dir`, minus `excludes`.
    fn sync_tree(&self, local_dir: &Path, remote_dir: &str, excludes: &[&str])
        -> Result<RemoteCommandResult, ExecError>;
}

/// Checked helpers layered on any executor.
pub trait RemoteExecutorExt: RemoteExecutor {
    fn connectivity(&self, err: ExecError) -> HoistError {
        HoistError::Connectivity {
            host: self.destination().to_string(),
            message: err.to_string(),
        }
    }

    /// Run `script`; connectivity faults and non-zero exits are both errors.
    fn run_checked(&self, step: &str, script: &str) -> HoistResult<RemoteCommandResult> {
        let result = self.execute(script).map_err(|e| self.connectivity(e))?;
        if result.success() {
            Ok(result)
        } else {
            Err(HoistError::RemoteCommand {
                step: step.to_string(),
                status: result.status,
                output: result.output.trim().to_string(),
            })
        }
    }

    /// Run a probe whose exit status is the answer.
    fn probe(&self, script: &str) -> HoistResult<bool> {
        self.execute(script)
            .map(|r| r.success())
            .map_err(|e| self.connectivity(e))
    }

    fn service_active(&self, unit: &str) -> HoistResult<bool> {
        self.probe(&shell::service_active(unit))
    }

    /// Status code of `http://127.0.0.1:<port>/` from the host itself.
    fn loopback_http_status(&self, port: u16) -> HoistResult<Option<u16>> {
        let result = self
            .execute(&shell::loopback_http_status(port))
            .map_err(|e| self.connectivity(e))?;
        Ok(shell::parse_http_status(&result.output))
    }
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutorExt for T {}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for &T {
    fn destination(&self) -> &str {
        (**self).destination()
    }

    fn execute(&self, script: &str) -> Result<RemoteCommandResult, ExecError> {
        (**self).execute(script)
    }

    fn upload(&self, local: &Path, remote_path: &str) -> Result<RemoteCommandResult, ExecError> {
        (**self).upload(local, remote_path)
    }

    fn sync_tree(
        &self,
        local_dir: &Path,
        remote_dir: &str,
        excludes: &[&str],
    ) -> Result<RemoteCommandResult, ExecError> {
        (**self).sync_tree(local_dir, remote_dir, excludes)
    }
}
