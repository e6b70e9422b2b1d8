//! Run command handler
//!
//! Loads and layers configuration, resolves it into a run request, then
//! deploys or cleans up through the adapter factory.

use anyhow::{Context, Result};
use tracing::{info, warn};

use hoist::application::{RunReport, SourceTree};
use hoist::config::{discover, resolve, Config, ConfigWarning, Prompter, ResolvedRun};
use hoist::domain::value_objects::RunMode;
use hoist::infrastructure::JsonEventSink;
use hoist::presentation::{factory, Cli};

use crate::commands::error_kind;
use crate::ui::context::UiContext;
use crate::ui::error::print_error;
use crate::ui::primitives::icon::Icon;
use crate::ui::prompt::DialoguerPrompter;
use crate::ui::views::run::{render_summary, TextEventSink};

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Execute one run. Failures are reported here; the caller only maps the
/// returned error to an exit code.
pub fn cmd_run(cli: &Cli) -> Result<()> {
    let loaded = load_config(cli);
    let ui_config = loaded
        .as_ref()
        .map(|(config, _)| config.clone())
        .unwrap_or_default();
    let ui = UiContext::new(
        cli.json,
        cli.verbose,
        cli.color,
        cli.non_interactive(env),
        &ui_config,
    );
    let json = cli.json.then(JsonEventSink::stdout);

    let result = loaded.and_then(|(config, warnings)| {
        show_config_warnings(&warnings, &ui);
        execute(cli, &config, &ui, json.as_ref())
    });

    if let Err(err) = &result {
        match &json {
            Some(sink) => sink.error(error_kind(err), &format!("{err:#}")),
            None => print_error(err, &ui),
        }
    }
    result
}

/// File, then `HOIST_*`, then flags.
fn load_config(cli: &Cli) -> Result<(Config, Vec<ConfigWarning>)> {
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let (config, warnings) = match discover(cli.config_path(env).as_deref(), &cwd)? {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Config::load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };
    Ok((cli.apply_to(config.with_env_overrides()?), warnings))
}

fn show_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    for warning in warnings {
        if ui.json {
            warn!("{warning}");
        } else {
            eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), warning);
        }
    }
}

fn execute(cli: &Cli, config: &Config, ui: &UiContext, json: Option<&JsonEventSink>) -> Result<()> {
    let mode = cli.mode(env);
    let prompter = ui.interactive.then(|| DialoguerPrompter::new(ui));
    let token = env("HOIST_TOKEN").filter(|t| !t.trim().is_empty());
    let has_token = token.is_some();

    let mut resolved = resolve(
        config,
        mode,
        token,
        prompter.as_ref().map(|p| p as &dyn Prompter),
    )?;

    if let (Some(prompter), false) = (&prompter, has_token) {
        ask_for_token(&mut resolved, prompter)?;
    }

    let report = match json {
        Some(sink) => {
            let report = factory::run(&resolved, sink)?;
            sink.complete(&report);
            report
        }
        None => {
            let sink = TextEventSink::new(*ui);
            let report = factory::run(&resolved, &sink)?;
            print!("{}", render_summary(&report, ui));
            report
        }
    };

    log_outcome(&report);
    Ok(())
}

/// HTTPS repositories may be private; SSH remotes authenticate via the agent.
fn ask_for_token(resolved: &mut ResolvedRun, prompter: &DialoguerPrompter) -> Result<()> {
    if let Some(SourceTree::Repository { repo, token }) = &mut resolved.request.source {
        if token.is_none() && repo.url.starts_with("https://") {
            *token = prompter.token()?;
        }
    }
    Ok(())
}

fn log_outcome(report: &RunReport) {
    match report.mode {
        RunMode::Deploy => info!(
            destination = %report.destination,
            warnings = report.warning_count(),
            "deploy finished"
        ),
        RunMode::Cleanup => info!(destination = %report.destination, "cleanup finished"),
    }
}
