//! Configuration type definitions
//!
//! Every field is optional at this layer. Required values are enforced when
//! the layered configuration is resolved into a run request.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::deploy::{DEFAULT_LOG_TAIL_LINES, DEFAULT_STARTUP_DELAY_SECS};
use crate::domain::value_objects::ConfigWarning;
use crate::error::HoistResult;

use super::loader;

/// Where to deploy (`[target]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    /// Private key for SSH; defaults to `~/.ssh/id_rsa`
    #[serde(default)]
    pub key: Option<PathBuf>,
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// What to deploy (`[repository]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    /// Local tree to deploy instead of a clone
    #[serde(default)]
    pub source: Option<PathBuf>,
}

/// SSH transport (`[ssh]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// Pin host keys to this file instead of trusting on first use
    #[serde(default)]
    pub known_hosts: Option<PathBuf>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            known_hosts: None,
            connect_timeout_secs: default_connect_timeout(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    900
}

/// Deploy tunables (`[deploy]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_startup_delay")]
    pub startup_delay_secs: u64,
    #[serde(default = "default_log_tail_lines")]
    pub log_tail_lines: usize,
    /// Timeout for the public HTTP probe
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            startup_delay_secs: default_startup_delay(),
            log_tail_lines: default_log_tail_lines(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

fn default_startup_delay() -> u64 {
    DEFAULT_STARTUP_DELAY_SECS
}

fn default_log_tail_lines() -> usize {
    DEFAULT_LOG_TAIL_LINES
}

fn default_probe_timeout() -> u64 {
    10
}

/// Output configuration (`[output]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Root of `hoist.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> HoistResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> HoistResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (HOIST_* prefix)
    pub fn with_env_overrides(self) -> HoistResult<Self> {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }
}
