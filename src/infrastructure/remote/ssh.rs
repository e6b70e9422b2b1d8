//! SSH Remote Executor
//!
//! Implements the `RemoteExecutor` port with the OpenSSH client binaries
//! (`ssh`, `scp`) and `rsync` tunnelled over the same ssh options, so every
//! transport path shares one host-key policy and one set of timeouts.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, warn};

use super::process::{run_with_deadline, ProcessError, ProcessOutput};
use crate::domain::ports::{ExecError, RemoteCommandResult, RemoteExecutor};
use crate::domain::services::shell;

/// ssh reserves this exit status for its own failures.
const SSH_FAILURE_STATUS: i32 = 255;

/// Client-side messages that mean "never reached a shell on the host".
const CONNECTIVITY_MARKERS: &[&str] = &[
    "Host key verification failed",
    "REMOTE HOST IDENTIFICATION HAS CHANGED",
    "Permission denied (publickey",
    "Connection refused",
    "Connection timed out",
    "Could not resolve hostname",
    "No route to host",
    "Network is unreachable",
    "Connection closed by",
];

/// How unknown and changed host keys are treated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostKeyPolicy {
    /// Trust a key the first time the host is seen; reject changes after that.
    #[default]
    AcceptNew,
    /// Only keys already in this known_hosts file are accepted.
    Pinned(PathBuf),
}

impl HostKeyPolicy {
    fn ssh_options(&self) -> Vec<String> {
        match self {
            HostKeyPolicy::AcceptNew => vec!["StrictHostKeyChecking=accept-new".to_string()],
            HostKeyPolicy::Pinned(file) => vec![
                "StrictHostKeyChecking=yes".to_string(),
                format!("UserKnownHostsFile={}", file.display()),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SshOptions {
    pub key: PathBuf,
    pub host_key: HostKeyPolicy,
    pub connect_timeout: Duration,
    /// Deadline for any single remote invocation
    pub command_timeout: Duration,
}

/// Remote executor backed by the system ssh client
pub struct SshExecutor {
    /// SSH destination (user@host)
    destination: String,
    options: SshOptions,
}

impl SshExecutor {
    pub fn new(destination: impl Into<String>, options: SshOptions) -> Self {
        let executor = Self {
            destination: destination.into(),
            options,
        };
        if executor.options.host_key == HostKeyPolicy::AcceptNew {
            warn!(
                "host key for {} will be trusted on first use; pass --known-hosts to pin it",
                executor.destination
            );
        }
        executor
    }

    /// `-i`/`-o` arguments shared by ssh, scp and rsync's `-e`
    fn common_args(&self) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            self.options.key.display().to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.options.connect_timeout.as_secs().max(1)),
            "-o".to_string(),
            "ServerAliveInterval=15".to_string(),
        ];
        for opt in self.options.host_key.ssh_options() {
            args.push("-o".to_string());
            args.push(opt);
        }
        args
    }

    /// Arguments for a single ssh invocation of `script`.
    fn ssh_args(&self, script: &str) -> (Vec<String>, Option<String>) {
        let mut args = self.common_args();
        args.push(self.destination.clone());
        if is_multi_line(script) {
            // One session for the whole script so `cd` and variables carry.
            args.push("bash -se".to_string());
            (args, Some(script.to_string()))
        } else {
            args.push("--".to_string());
            args.push(script.to_string());
            (args, None)
        }
    }

    /// `-e` value for rsync
    fn rsync_remote_shell(&self) -> String {
        let mut parts = vec!["ssh".to_string()];
        parts.extend(self.common_args().iter().map(|a| shell::quote(a)));
        parts.join(" ")
    }

    fn rsync_args(&self, local_dir: &Path, remote_dir: &str, excludes: &[&str]) -> Vec<String> {
        let mut args = vec!["-az".to_string(), "--delete".to_string()];
        for pattern in excludes {
            args.push(format!("--exclude={pattern}"));
        }
        args.push("-e".to_string());
        args.push(self.rsync_remote_shell());
        // Trailing slashes: copy the contents, not the directory itself.
        args.push(format!("{}/", local_dir.display()));
        args.push(format!("{}:{}/", self.destination, remote_dir.trim_end_matches('/')));
        args
    }

    fn run(&self, program: &str, args: &[String], input: Option<&str>) -> Result<ProcessOutput, ExecError> {
        debug!("{} {}", program, args.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args);
        run_with_deadline(cmd, input, self.options.command_timeout).map_err(|e| match e {
            ProcessError::Spawn(err) => ExecError::Spawn(err),
            ProcessError::TimedOut(after) => ExecError::Timeout(after),
        })
    }
}

impl RemoteExecutor for SshExecutor {
    fn destination(&self) -> &str {
        &self.destination
    }

    fn execute(&self, script: &str) -> Result<RemoteCommandResult, ExecError> {
        let (args, input) = self.ssh_args(script);
        let out = self.run("ssh", &args, input.as_deref())?;
        debug!("ssh exit {}", out.status);

        if out.status == SSH_FAILURE_STATUS {
            return Err(ExecError::Connectivity(first_line(&out.stderr)));
        }
        Ok(RemoteCommandResult {
            status: out.status,
            output: out.combined(),
        })
    }

    fn upload(&self, local: &Path, remote_path: &str) -> Result<RemoteCommandResult, ExecError> {
        let mut args = vec!["-q".to_string()];
        args.extend(self.common_args());
        args.push(local.display().to_string());
        args.push(format!("{}:{}", self.destination, remote_path));

        transfer_result(self.run("scp", &args, None)?)
    }

    fn sync_tree(
        &self,
        local_dir: &Path,
        remote_dir: &str,
        excludes: &[&str],
    ) -> Result<RemoteCommandResult, ExecError> {
        let args = self.rsync_args(local_dir, remote_dir, excludes);
        transfer_result(self.run("rsync", &args, None)?)
    }
}

/// scp and rsync share one exit status space for transport and remote
/// faults, so tell them apart by what the client printed.
fn transfer_result(out: ProcessOutput) -> Result<RemoteCommandResult, ExecError> {
    if out.status != 0 && is_connectivity_failure(out.status, &out.stderr) {
        return Err(ExecError::Connectivity(first_line(&out.stderr)));
    }
    Ok(RemoteCommandResult {
        status: out.status,
        output: out.combined(),
    })
}

fn is_multi_line(script: &str) -> bool {
    script.trim().contains('\n')
}

fn is_connectivity_failure(status: i32, stderr: &str) -> bool {
    status == SSH_FAILURE_STATUS || CONNECTIVITY_MARKERS.iter().any(|m| stderr.contains(m))
}

fn first_line(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("Warning: Permanently added"))
        .unwrap_or("ssh connection failed")
        .to_string()
}
