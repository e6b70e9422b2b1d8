//! Fixed remote filesystem layout.
//!
//! These names are part of the compatibility contract: re-runs must find
//! what earlier runs created, so they are constants rather than config.

use super::SshUser;

/// Directory name of the application tree under the user's home
pub const APP_DIR_NAME: &str = "app";
/// nginx site file name, in both sites-available and sites-enabled
pub const PROXY_SITE_NAME: &str = "app_proxy";
pub const NGINX_SITES_AVAILABLE: &str = "/etc/nginx/sites-available";
pub const NGINX_SITES_ENABLED: &str = "/etc/nginx/sites-enabled";
/// World-writable upload location; the file is moved out under sudo
pub const PROXY_STAGING_PATH: &str = "/tmp/app_proxy";
/// Public port the proxy listens on
pub const PROXY_LISTEN_PORT: u16 = 80;

/// Paths left out of the artifact transfer: VCS metadata, dependency
/// caches and local secrets.
pub const TRANSFER_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    ".env",
    ".env.*",
];

/// Remote paths derived from the SSH user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLayout {
    app_dir: String,
}

impl RemoteLayout {
    pub fn for_user(user: &SshUser) -> Self {
        Self {
            app_dir: format!("/home/{}/{}", user, APP_DIR_NAME),
        }
    }

    /// `/home/<user>/app`
    pub fn app_dir(&self) -> &str {
        &self.app_dir
    }

    /// Image tag and container name, derived from the app directory name.
    pub fn workload_name(&self) -> String {
        let base = self.app_dir.rsplit('/').next().unwrap_or(APP_DIR_NAME);
        let name: String = base
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' { c } else { '-' })
            .collect();
        if name.is_empty() {
            APP_DIR_NAME.to_string()
        } else {
            name
        }
    }

    pub fn site_available(&self) -> String {
        format!("{NGINX_SITES_AVAILABLE}/{PROXY_SITE_NAME}")
    }

    pub fn site_enabled(&self) -> String {
        format!("{NGINX_SITES_ENABLED}/{PROXY_SITE_NAME}")
    }

    pub fn default_site_enabled(&self) -> String {
        format!("{NGINX_SITES_ENABLED}/default")
    }
}
