//! Human-readable progress and summary for a run.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::Stylize;

use hoist::application::RunReport;
use hoist::domain::ports::{StageEvent, StageEventSink};
use hoist::domain::value_objects::RunMode;

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::theme;

/// Prints stage progress to stdout as the run advances.
///
/// Stage headers and steps are only shown with `-v`; completions, warnings
/// and failures always are.
pub struct TextEventSink {
    ui: UiContext,
}

impl TextEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }

    fn line(&self, text: String) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }

    fn dim(&self, text: &str) -> String {
        if self.ui.color {
            format!("{}", text.with(theme::colors::MUTED))
        } else {
            text.to_string()
        }
    }
}

impl StageEventSink for TextEventSink {
    fn on_event(&self, event: StageEvent) {
        let (color, unicode) = (self.ui.color, self.ui.unicode);
        match event {
            StageEvent::RunStarted { mode, destination } => {
                let (icon, verb) = match mode {
                    RunMode::Deploy => (Icon::Deploy, "Deploying to"),
                    RunMode::Cleanup => (Icon::Clean, "Cleaning up"),
                };
                self.line(format!(
                    "{} {} {}\n",
                    icon.colored(color, unicode),
                    verb,
                    destination
                ));
            }
            StageEvent::StageStarted { stage } => {
                if self.ui.verbose > 0 {
                    self.line(format!(
                        "{} {}",
                        Icon::Progress.colored(color, unicode),
                        stage.title()
                    ));
                }
            }
            StageEvent::Step { message, .. } => {
                if self.ui.verbose > 0 {
                    self.line(format!(
                        "  {} {}",
                        Icon::Arrow.colored(color, unicode),
                        self.dim(&message)
                    ));
                }
            }
            StageEvent::Warning { stage, message } => {
                self.line(format!(
                    "  {} {}",
                    Icon::Warning.colored(color, unicode),
                    first_line(&message)
                ));
                for extra in message.lines().skip(1) {
                    self.line(format!("      {}", self.dim(extra)));
                }
                if self.ui.caps.is_github_actions {
                    self.line(github_actions_annotation(
                        AnnotationLevel::Warning,
                        &message,
                        &format!("hoist: {}", stage.as_str()),
                    ));
                }
            }
            StageEvent::StageCompleted {
                stage,
                warnings,
                elapsed,
            } => {
                let icon = if warnings == 0 {
                    Icon::Success
                } else {
                    Icon::Warning
                };
                self.line(format!(
                    "{} {} {}",
                    icon.colored(color, unicode),
                    stage.title(),
                    self.dim(&format_elapsed(elapsed))
                ));
            }
            StageEvent::StageFailed { stage, .. } => {
                // The error itself is printed once, by the caller.
                self.line(format!("{} {}", Icon::Error.colored(color, unicode), stage.title()));
            }
        }
    }
}

/// Closing summary after a successful run.
pub fn render_summary(report: &RunReport, ui: &UiContext) -> String {
    let (color, unicode) = (ui.color, ui.unicode);
    let warnings = report.warning_count();
    let verb = match report.mode {
        RunMode::Deploy => "Deploy",
        RunMode::Cleanup => "Cleanup",
    };

    let mut out = String::new();
    out.push('\n');
    if warnings == 0 {
        let headline = format!("{verb} complete");
        let headline = if color {
            format!("{}", headline.as_str().with(theme::colors::OK).bold())
        } else {
            headline
        };
        out.push_str(&format!("{} {}", Icon::Success.colored(color, unicode), headline));
    } else {
        let noun = if warnings == 1 { "warning" } else { "warnings" };
        out.push_str(&format!(
            "{} {verb} complete with {warnings} {noun}",
            Icon::Warning.colored(color, unicode)
        ));
    }
    out.push_str(&format!(
        " ({}, {})\n",
        report.destination,
        format_elapsed(report.elapsed())
    ));

    if report.mode == RunMode::Cleanup {
        out.push_str("  Packages and group membership were left in place.\n");
    }
    out
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or(message)
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        format!("{}m{:02}s", elapsed.as_secs() / 60, elapsed.as_secs() % 60)
    }
}
