//! Deployment target value object - where and how this run deploys.

use std::path::PathBuf;

use super::{AppPort, HostAddress, RemoteLayout, ServerName, SshUser};

/// Everything the operator supplies about the remote side.
///
/// Built once per run from validated parts and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub host: HostAddress,
    pub user: SshUser,
    /// Private key passed to `ssh -i`
    pub key: PathBuf,
    pub port: AppPort,
    pub domain: Option<ServerName>,
}

impl DeploymentTarget {
    /// SSH destination in `user@host` form
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Server name for the proxy route, falling back to the placeholder
    pub fn server_name(&self) -> ServerName {
        self.domain.clone().unwrap_or_default()
    }

    pub fn layout(&self) -> RemoteLayout {
        RemoteLayout::for_user(&self.user)
    }
}
