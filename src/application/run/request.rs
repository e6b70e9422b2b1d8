//! Run request and the ports a run is executed against.

use std::fmt;
use std::path::PathBuf;

use crate::application::deploy::DeployOptions;
use crate::domain::ports::{ContainerRuntime, HttpProbe, ProxyServer, RemoteExecutor, RepositorySync};
use crate::domain::value_objects::{DeploymentTarget, RepositoryDescriptor, RunMode};

/// Where the working tree comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceTree {
    /// Clone or update a repository
    Repository {
        repo: RepositoryDescriptor,
        token: Option<String>,
    },
    /// Deploy an existing local directory as-is
    Local(PathBuf),
}

// Hand-written so the token never reaches a log line.
impl fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTree::Repository { repo, token } => f
                .debug_struct("Repository")
                .field("repo", repo)
                .field("token", &token.as_ref().map(|_| "***"))
                .finish(),
            SourceTree::Local(path) => f.debug_tuple("Local").field(path).finish(),
        }
    }
}

/// Fully validated input for one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub target: DeploymentTarget,
    pub mode: RunMode,
    /// Required for deploys, ignored by cleanup
    pub source: Option<SourceTree>,
    pub deploy: DeployOptions,
}

/// The collaborators a run drives.
pub struct RunPorts<'a> {
    pub exec: &'a dyn RemoteExecutor,
    pub runtime: &'a dyn ContainerRuntime,
    pub proxy: &'a dyn ProxyServer,
    pub probe: &'a dyn HttpProbe,
    pub repository: &'a dyn RepositorySync,
}
