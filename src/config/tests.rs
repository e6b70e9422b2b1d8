//! Tests for the config module

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::{tempdir, TempDir};

use super::loader::{discover, with_env_overrides};
use super::resolve::{resolve, Prompter};
use super::types::*;
use crate::application::run::SourceTree;
use crate::domain::value_objects::RunMode;
use crate::error::{ErrorKind, HoistResult};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// A config pointing at a real (empty) key file.
fn complete(dir: &TempDir) -> Config {
    let key = dir.path().join("id_ed25519");
    fs::write(&key, "key").unwrap();
    let mut config = Config::default();
    config.target.host = Some("192.0.2.10".to_string());
    config.target.user = Some("deploy".to_string());
    config.target.key = Some(key);
    config.target.port = Some(8080);
    config.repository.url = Some("https://example.com/sample.git".to_string());
    config
}

struct ScriptedPrompt {
    answers: RefCell<Vec<&'static str>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(answers: &[&'static str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().rev().copied().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompt {
    fn input(&self, label: &str) -> HoistResult<String> {
        self.asked.borrow_mut().push(label.to_string());
        Ok(self.answers.borrow_mut().pop().unwrap_or_default().to_string())
    }
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.ssh.connect_timeout_secs, 10);
    assert_eq!(config.ssh.command_timeout_secs, 900);
    assert_eq!(config.deploy.startup_delay_secs, 5);
    assert_eq!(config.deploy.log_tail_lines, 30);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.output.unicode);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[target]
host = "203.0.113.7"
user = "ubuntu"
port = 3000
domain = "shop.example.com"

[repository]
url = "https://example.com/shop.git"
branch = "release"

[ssh]
connect_timeout_secs = 4

[output]
color = "never"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.target.host.as_deref(), Some("203.0.113.7"));
    assert_eq!(config.target.port, Some(3000));
    assert_eq!(config.repository.branch.as_deref(), Some("release"));
    assert_eq!(config.ssh.connect_timeout_secs, 4);
    assert_eq!(config.ssh.command_timeout_secs, 900);
    assert_eq!(config.output.color, ColorMode::Never);
}

#[test]
fn test_unknown_keys_are_warnings_with_suggestions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hoist.toml");
    fs::write(&path, "[target]\nhost = \"192.0.2.10\"\ndomian = \"x.example.com\"\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();

    assert_eq!(config.target.host.as_deref(), Some("192.0.2.10"));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "target.domian");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("domain"));
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hoist.toml");
    fs::write(&path, "[target\nhost = 1").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputValidation);
    assert!(err.to_string().contains("hoist.toml"));
}

#[test]
fn test_env_overrides_replace_file_values() {
    let mut config = Config::default();
    config.target.host = Some("192.0.2.10".to_string());
    config.repository.branch = Some("main".to_string());

    let config = with_env_overrides(
        config,
        env(&[
            ("HOIST_SSH_HOST", "198.51.100.4"),
            ("HOIST_BRANCH", "staging"),
            ("HOIST_APP_PORT", "9000"),
            ("HOIST_DOMAIN", ""),
        ]),
    )
    .unwrap();

    assert_eq!(config.target.host.as_deref(), Some("198.51.100.4"));
    assert_eq!(config.repository.branch.as_deref(), Some("staging"));
    assert_eq!(config.target.port, Some(9000));
    assert_eq!(config.target.domain, None);
}

#[test]
fn test_env_port_must_be_numeric() {
    let err = with_env_overrides(Config::default(), env(&[("HOIST_APP_PORT", "http")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputValidation);
}

#[test]
fn test_discover_prefers_explicit_then_project_file() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("hoist.toml");
    fs::write(&project, "").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "").unwrap();

    assert_eq!(discover(Some(&explicit), dir.path()).unwrap(), Some(explicit));
    assert_eq!(discover(None, dir.path()).unwrap(), Some(project));
    assert!(discover(Some(Path::new("/nonexistent/hoist.toml")), dir.path()).is_err());
}

#[test]
fn test_resolve_complete_config() {
    let dir = tempdir().unwrap();
    let config = complete(&dir);

    let run = resolve(&config, RunMode::Deploy, Some("s3cr3t".to_string()), None).unwrap();

    assert_eq!(run.request.target.destination(), "deploy@192.0.2.10");
    assert_eq!(run.request.target.port.get(), 8080);
    assert!(run.request.target.server_name().is_placeholder());
    assert_eq!(run.connect_timeout, Duration::from_secs(10));
    match run.request.source {
        Some(SourceTree::Repository { repo, token }) => {
            assert_eq!(repo.branch, "main");
            assert_eq!(token.as_deref(), Some("s3cr3t"));
        }
        other => panic!("unexpected source {other:?}"),
    }
}

#[test]
fn test_resolve_rejects_bad_values_locally() {
    let dir = tempdir().unwrap();

    let mut config = complete(&dir);
    config.target.port = Some(70000);
    let err = resolve(&config, RunMode::Deploy, None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputValidation);

    let mut config = complete(&dir);
    config.target.host = Some("999.1.1.1".to_string());
    assert!(resolve(&config, RunMode::Deploy, None, None).is_err());

    let mut config = complete(&dir);
    config.target.key = Some(dir.path().join("missing"));
    let err = resolve(&config, RunMode::Deploy, None, None).unwrap_err();
    assert!(err.to_string().contains("key"));
}

#[test]
fn test_resolve_without_prompt_requires_values() {
    let dir = tempdir().unwrap();
    let mut config = complete(&dir);
    config.target.user = None;

    let err = resolve(&config, RunMode::Deploy, None, None).unwrap_err();
    assert_eq!(err.to_string(), "invalid user: a value is required");
}

#[test]
fn test_resolve_prompts_for_missing_values() {
    let dir = tempdir().unwrap();
    let mut config = complete(&dir);
    config.target.user = None;
    config.target.port = None;
    let prompt = ScriptedPrompt::new(&["ubuntu", "3000"]);

    let run = resolve(&config, RunMode::Deploy, None, Some(&prompt)).unwrap();

    assert_eq!(*prompt.asked.borrow(), vec!["SSH user", "Application port"]);
    assert_eq!(run.request.target.user.as_str(), "ubuntu");
    assert_eq!(run.request.target.port.get(), 3000);
}

#[test]
fn test_cleanup_needs_no_repository() {
    let dir = tempdir().unwrap();
    let mut config = complete(&dir);
    config.repository.url = None;

    let run = resolve(&config, RunMode::Cleanup, None, None).unwrap();
    assert!(run.request.source.is_none());
}

#[test]
fn test_local_source_wins_over_repository() {
    let dir = tempdir().unwrap();
    let mut config = complete(&dir);
    let tree = dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    config.repository.source = Some(tree.clone());

    let run = resolve(&config, RunMode::Deploy, None, None).unwrap();
    assert_eq!(
        run.request.source,
        Some(SourceTree::Local(tree.canonicalize().unwrap()))
    );
}
