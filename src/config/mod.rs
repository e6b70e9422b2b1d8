//! Configuration module for hoist
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HOIST_*)
//! 3. Project config (./hoist.toml)
//! 4. User config (~/.config/hoist/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod resolve;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{discover, user_config_path, PROJECT_CONFIG_FILE};
pub use resolve::{expand_home, resolve, Prompter, ResolvedRun};
pub use types::{
    ColorMode, Config, DeployConfig, OutputConfig, RepositoryConfig, SshConfig, TargetConfig,
};
