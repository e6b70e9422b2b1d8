//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Every value flag can also come from `HOIST_*` or `hoist.toml`; flags win
//! - `--cleanup` switches the whole run to teardown; there are no subcommands

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::domain::value_objects::RunMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Hoist - provision a host and deploy a containerized app behind nginx
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Every run is safe to repeat: it reconciles the host to the desired state.")]
pub struct Cli {
    /// Git repository to deploy
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// Branch to deploy [default: main]
    #[arg(long)]
    pub branch: Option<String>,

    /// Deploy a local directory instead of cloning
    #[arg(long, value_name = "DIR", conflicts_with = "repo")]
    pub source: Option<PathBuf>,

    /// SSH user on the target host
    #[arg(long)]
    pub user: Option<String>,

    /// Target host (IPv4 address or hostname)
    #[arg(long)]
    pub host: Option<String>,

    /// SSH private key [default: ~/.ssh/id_rsa]
    #[arg(long, value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// Port the application listens on
    #[arg(long)]
    pub port: Option<u32>,

    /// Domain for the nginx server block
    #[arg(long)]
    pub domain: Option<String>,

    /// Only accept host keys listed in this known_hosts file
    #[arg(long, value_name = "FILE")]
    pub known_hosts: Option<PathBuf>,

    /// Tear down what previous deploys created
    #[arg(long)]
    pub cleanup: bool,

    /// Never prompt; missing values are errors
    #[arg(long)]
    pub non_interactive: bool,

    /// Config file [default: ./hoist.toml, then the user config]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Layer the value flags over `config`.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(repo) = &self.repo {
            config.repository.url = Some(repo.clone());
            config.repository.source = None;
        }
        if let Some(branch) = &self.branch {
            config.repository.branch = Some(branch.clone());
        }
        if let Some(source) = &self.source {
            config.repository.source = Some(source.clone());
        }
        if let Some(user) = &self.user {
            config.target.user = Some(user.clone());
        }
        if let Some(host) = &self.host {
            config.target.host = Some(host.clone());
        }
        if let Some(key) = &self.key {
            config.target.key = Some(key.clone());
        }
        if let Some(port) = self.port {
            config.target.port = Some(port);
        }
        if let Some(domain) = &self.domain {
            config.target.domain = Some(domain.clone());
        }
        if let Some(file) = &self.known_hosts {
            config.ssh.known_hosts = Some(file.clone());
        }
        config
    }

    pub fn mode(&self, env: impl Fn(&str) -> Option<String>) -> RunMode {
        RunMode::from_cleanup_flag(self.cleanup || env_flag(&env, "HOIST_CLEANUP"))
    }

    pub fn non_interactive(&self, env: impl Fn(&str) -> Option<String>) -> bool {
        self.non_interactive || env_flag(&env, "HOIST_NON_INTERACTIVE")
    }

    pub fn config_path(&self, env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| env("HOIST_CONFIG").filter(|v| !v.is_empty()).map(PathBuf::from))
    }
}

fn env_flag(env: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    env(key).is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}
