//! Resolve the merged configuration into a validated run request
//!
//! Everything here is local. A request that comes out of `resolve` has a
//! parsed host, user, port and server name, an existing key file and, for
//! deploys, a source tree to build from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::deploy::DeployOptions;
use crate::application::run::{RunRequest, SourceTree};
use crate::domain::value_objects::{
    AppPort, DeploymentTarget, HostAddress, RepositoryDescriptor, RunMode, ServerName, SshUser,
};
use crate::error::{HoistError, HoistResult};
use crate::infrastructure::sync::resolve_local_tree;

use super::types::Config;

/// Asks the operator for values the configuration left out.
pub trait Prompter {
    fn input(&self, label: &str) -> HoistResult<String>;
}

/// A run request plus the transport settings the adapters are built from.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub request: RunRequest,
    pub known_hosts: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
    pub probe_timeout: Duration,
}

pub fn resolve(
    config: &Config,
    mode: RunMode,
    token: Option<String>,
    prompt: Option<&dyn Prompter>,
) -> HoistResult<ResolvedRun> {
    let ask = |field: &'static str, label: &str, value: Option<String>| -> HoistResult<String> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            return Ok(value);
        }
        match prompt {
            Some(prompt) => prompt.input(label),
            None => Err(HoistError::input(field, "a value is required")),
        }
    };

    let host = HostAddress::parse(&ask("host", "SSH host", config.target.host.clone())?)?;
    let user = SshUser::parse(&ask("user", "SSH user", config.target.user.clone())?)?;
    let port = match config.target.port {
        Some(port) => AppPort::new(port)?,
        None => ask("port", "Application port", None)?.parse::<AppPort>()?,
    };
    let domain = config
        .target
        .domain
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ServerName::parse)
        .transpose()?;
    let key = resolve_key(config.target.key.as_deref())?;

    let known_hosts = match &config.ssh.known_hosts {
        Some(file) => {
            let file = expand_home(file);
            if !file.is_file() {
                return Err(HoistError::input(
                    "known-hosts",
                    format!("{} does not exist", file.display()),
                ));
            }
            Some(file)
        }
        None => None,
    };

    let source = match mode {
        RunMode::Cleanup => None,
        RunMode::Deploy => Some(match &config.repository.source {
            Some(dir) => SourceTree::Local(resolve_local_tree(&expand_home(dir))?),
            None => {
                let url = ask("repository", "Repository URL", config.repository.url.clone())?;
                SourceTree::Repository {
                    repo: RepositoryDescriptor::new(&url, config.repository.branch.as_deref())?,
                    token: token.filter(|t| !t.is_empty()),
                }
            }
        }),
    };

    let deploy = DeployOptions::default()
        .with_startup_delay(Duration::from_secs(config.deploy.startup_delay_secs))
        .with_log_tail_lines(config.deploy.log_tail_lines);

    Ok(ResolvedRun {
        request: RunRequest {
            target: DeploymentTarget {
                host,
                user,
                key,
                port,
                domain,
            },
            mode,
            source,
            deploy,
        },
        known_hosts,
        connect_timeout: Duration::from_secs(config.ssh.connect_timeout_secs),
        command_timeout: Duration::from_secs(config.ssh.command_timeout_secs),
        probe_timeout: Duration::from_secs(config.deploy.probe_timeout_secs),
    })
}

fn resolve_key(configured: Option<&Path>) -> HoistResult<PathBuf> {
    let key = match configured {
        Some(path) => expand_home(path),
        None => dirs::home_dir()
            .map(|home| home.join(".ssh").join("id_rsa"))
            .ok_or_else(|| HoistError::input("key", "no home directory; pass --key"))?,
    };
    if !key.is_file() {
        return Err(HoistError::input(
            "key",
            format!("{} does not exist", key.display()),
        ));
    }
    Ok(key)
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
