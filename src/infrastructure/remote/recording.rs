//! Test double that records every command and answers from a script.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::domain::ports::{ExecError, RemoteCommandResult, RemoteExecutor};

/// Answers commands by first matching substring; unmatched commands succeed
/// with empty output.
#[derive(Default)]
pub struct RecordingExecutor {
    pub commands: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<(PathBuf, String, String)>>,
    responses: Vec<(String, RemoteCommandResult)>,
    upload_result: Option<RemoteCommandResult>,
    unreachable: bool,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn respond(mut self, needle: &str, status: i32, output: &str) -> Self {
        self.responses
            .push((needle.to_string(), RemoteCommandResult::failed(status, output)));
        self
    }

    /// Answer every upload with this status, as scp would on a remote fault.
    pub fn reject_uploads(mut self, status: i32, output: &str) -> Self {
        self.upload_result = Some(RemoteCommandResult::failed(status, output));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    pub fn position(&self, needle: &str) -> Option<usize> {
        self.commands.borrow().iter().position(|c| c.contains(needle))
    }

    pub fn ran(&self, needle: &str) -> bool {
        self.position(needle).is_some()
    }
}

impl RemoteExecutor for RecordingExecutor {
    fn destination(&self) -> &str {
        "deploy@192.0.2.10"
    }

    fn execute(&self, script: &str) -> Result<RemoteCommandResult, ExecError> {
        if self.unreachable {
            return Err(ExecError::Connectivity("Connection refused".to_string()));
        }
        self.commands.borrow_mut().push(script.to_string());
        Ok(self
            .responses
            .iter()
            .find(|(needle, _)| script.contains(needle.as_str()))
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| RemoteCommandResult::ok("")))
    }

    fn upload(&self, local: &Path, remote_path: &str) -> Result<RemoteCommandResult, ExecError> {
        if self.unreachable {
            return Err(ExecError::Connectivity("Connection refused".to_string()));
        }
        if let Some(rejected) = &self.upload_result {
            return Ok(rejected.clone());
        }
        let content = std::fs::read_to_string(local).unwrap_or_default();
        self.uploads
            .borrow_mut()
            .push((local.to_path_buf(), remote_path.to_string(), content));
        Ok(RemoteCommandResult::ok(""))
    }

    fn sync_tree(
        &self,
        local_dir: &Path,
        remote_dir: &str,
        _excludes: &[&str],
    ) -> Result<RemoteCommandResult, ExecError> {
        self.execute(&format!("rsync {} {}", local_dir.display(), remote_dir))
    }
}
