//! Configuration loading
//!
//! Precedence, highest first: CLI flags, `HOIST_*` environment variables,
//! the config file, built-in defaults. CLI flags are applied by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{HoistError, HoistResult};

use super::types::Config;

pub const PROJECT_CONFIG_FILE: &str = "hoist.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HoistResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| HoistError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HoistError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let leaf = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &leaf),
                suggestion: suggest_key(&leaf),
                key: path_str,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config file to use: the explicit one, `./hoist.toml`, then the user
/// config. An explicit path that does not exist is an error.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> HoistResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(HoistError::input(
                "config",
                format!("{} does not exist", path.display()),
            ));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Ok(Some(project));
    }

    Ok(user_config_path().filter(|p| p.is_file()))
}

/// `~/.config/hoist/config.toml` (platform config dir)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hoist").join("config.toml"))
}

/// Apply `HOIST_*` overrides read through `env`.
pub fn with_env_overrides(
    mut config: Config,
    env: impl Fn(&str) -> Option<String>,
) -> HoistResult<Config> {
    let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = var("HOIST_REPO_URL") {
        config.repository.url = Some(url);
    }
    if let Some(branch) = var("HOIST_BRANCH") {
        config.repository.branch = Some(branch);
    }
    if let Some(source) = var("HOIST_SOURCE") {
        config.repository.source = Some(PathBuf::from(source));
    }
    if let Some(user) = var("HOIST_SSH_USER") {
        config.target.user = Some(user);
    }
    if let Some(host) = var("HOIST_SSH_HOST") {
        config.target.host = Some(host);
    }
    if let Some(key) = var("HOIST_SSH_KEY") {
        config.target.key = Some(PathBuf::from(key));
    }
    if let Some(port) = var("HOIST_APP_PORT") {
        let parsed = port.trim().parse::<u32>().map_err(|_| {
            HoistError::input("port", format!("HOIST_APP_PORT='{port}' is not a number"))
        })?;
        config.target.port = Some(parsed);
    }
    if let Some(domain) = var("HOIST_DOMAIN") {
        config.target.domain = Some(domain);
    }
    if let Some(file) = var("HOIST_KNOWN_HOSTS") {
        config.ssh.known_hosts = Some(PathBuf::from(file));
    }

    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "target",
        "host",
        "user",
        "key",
        "port",
        "domain",
        "repository",
        "url",
        "branch",
        "source",
        "ssh",
        "known_hosts",
        "connect_timeout_secs",
        "command_timeout_secs",
        "deploy",
        "startup_delay_secs",
        "log_tail_lines",
        "probe_timeout_secs",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
