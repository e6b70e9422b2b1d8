//! Remote host adapters
//!
//! `SshExecutor` is the transport. `DockerCli` and `NginxSites` layer the
//! typed container and proxy ports on top of any executor.

mod docker;
mod nginx;
mod process;
mod ssh;

#[cfg(test)]
pub(crate) mod recording;

pub use docker::{ComposeCommand, DockerCli};
pub use nginx::NginxSites;
pub use ssh::{HostKeyPolicy, SshExecutor, SshOptions};
