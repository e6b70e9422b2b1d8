//! Domain Value Objects
//!
//! Immutable, validated values. Constructing one is the input validation:
//! a run that holds a `DeploymentTarget` has already rejected bad hosts,
//! ports, users and domains.

mod app_port;
mod config_warning;
mod deploy_target;
mod host;
mod layout;
mod repository;
mod run_mode;
mod server_name;
mod ssh_user;

pub use app_port::AppPort;
pub use config_warning::ConfigWarning;
pub use deploy_target::DeploymentTarget;
pub use host::HostAddress;
pub use layout::{
    RemoteLayout, APP_DIR_NAME, NGINX_SITES_AVAILABLE, NGINX_SITES_ENABLED, PROXY_LISTEN_PORT,
    PROXY_SITE_NAME, PROXY_STAGING_PATH, TRANSFER_EXCLUDES,
};
pub use repository::{RepositoryDescriptor, DEFAULT_BRANCH};
pub use run_mode::RunMode;
pub use server_name::{ServerName, PLACEHOLDER_SERVER_NAME};
pub use ssh_user::SshUser;
