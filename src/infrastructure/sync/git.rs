//! Git repository synchronizer
//!
//! Keeps one checkout per repository under the user cache directory and
//! brings it to the tip of the requested branch with the `git` CLI. The
//! access token is only ever passed on the command line of a single
//! invocation; it is never written to `.git/config` or logged.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::domain::ports::RepositorySync;
use crate::domain::value_objects::RepositoryDescriptor;
use crate::error::{HoistError, HoistResult};

const REDACTED: &str = "***";

pub struct GitSync {
    /// Directory holding one checkout per repository
    checkout_root: PathBuf,
}

impl GitSync {
    pub fn new(checkout_root: impl Into<PathBuf>) -> Self {
        Self {
            checkout_root: checkout_root.into(),
        }
    }

    /// `<cache dir>/hoist/repos`, or a temp directory when there is no cache dir.
    pub fn default_root() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("hoist")
            .join("repos")
    }

    fn clone_fresh(
        &self,
        repo: &RepositoryDescriptor,
        url: &str,
        dir: &Path,
        token: Option<&str>,
    ) -> HoistResult<()> {
        info!("cloning {} ({})", repo.url, repo.branch);
        std::fs::create_dir_all(&self.checkout_root)?;
        let dir_arg = dir.display().to_string();
        git(
            None,
            &["clone", "--branch", &repo.branch, "--single-branch", "--", url, &dir_arg],
            token,
        )?;
        // The token must not outlive this run in the checkout's config.
        git(Some(dir), &["remote", "set-url", "origin", &repo.url], token)
    }

    fn update(
        &self,
        repo: &RepositoryDescriptor,
        url: &str,
        dir: &Path,
        token: Option<&str>,
    ) -> HoistResult<()> {
        info!("updating {} ({})", repo.url, repo.branch);
        git(Some(dir), &["remote", "set-url", "origin", &repo.url], token)?;
        git(Some(dir), &["fetch", "--prune", url, &repo.branch], token)?;
        git(Some(dir), &["checkout", "--force", "-B", &repo.branch, "FETCH_HEAD"], token)?;
        git(Some(dir), &["reset", "--hard", "FETCH_HEAD"], token)?;
        git(Some(dir), &["clean", "-fd"], token)
    }
}

impl RepositorySync for GitSync {
    fn sync(&self, repo: &RepositoryDescriptor, token: Option<&str>) -> HoistResult<PathBuf> {
        let dir = self.checkout_root.join(&repo.local_name);
        let url = repo.authenticated_url(token);

        if dir.join(".git").is_dir() {
            self.update(repo, &url, &dir, token)?;
        } else {
            if dir.exists() {
                // Leftover from an interrupted clone.
                std::fs::remove_dir_all(&dir)?;
            }
            self.clone_fresh(repo, &url, &dir, token)?;
        }
        Ok(dir)
    }
}

fn git(dir: Option<&Path>, args: &[&str], token: Option<&str>) -> HoistResult<()> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.arg("-C").arg(dir);
    }
    cmd.args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null());

    debug!("git {}", redact(&args.join(" "), token));
    let output = cmd.output().map_err(|e| HoistError::RepositorySync {
        message: format!("failed to run git: {e}"),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HoistError::RepositorySync {
            message: format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                redact(stderr.trim(), token)
            ),
        });
    }
    Ok(())
}

/// Replace every occurrence of the token with a fixed marker.
pub fn redact(text: &str, token: Option<&str>) -> String {
    match token {
        Some(t) if !t.is_empty() => text.replace(t, REDACTED),
        _ => text.to_string(),
    }
}
