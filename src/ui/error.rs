//! Failure output for text mode.

use crossterm::style::Stylize;

use hoist::{ErrorKind, HoistError};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::theme;

pub fn format_error(err: &anyhow::Error, ui: &UiContext) -> String {
    let message = format!("{err:#}");
    let headline = if ui.color {
        format!("{}", "Error".with(theme::colors::FAILED).bold())
    } else {
        "Error".to_string()
    };

    let mut out = format!(
        "\n{} {}: {}\n",
        Icon::Error.colored(ui.color, ui.unicode),
        headline,
        message.trim_end()
    );
    if let Some(hint) = err.downcast_ref::<HoistError>().and_then(hint) {
        out.push_str(&format!("  {hint}\n"));
    }
    out
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.caps.is_github_actions {
        println!(
            "{}",
            github_actions_annotation(AnnotationLevel::Error, &format!("{err:#}"), "hoist")
        );
    }
    eprint!("{}", format_error(err, ui));
}

fn hint(err: &HoistError) -> Option<&'static str> {
    match err {
        HoistError::NoApplicationDescriptor { .. } => {
            Some("Add a docker-compose.yml or a Dockerfile at the root of the repository.")
        }
        HoistError::ConfigValidation { .. } => {
            Some("The previous proxy configuration is still being served.")
        }
        _ => match err.kind() {
            ErrorKind::Connectivity => {
                Some("Check --host, --user and --key; nothing was changed on the host.")
            }
            ErrorKind::RemoteCommand => Some("Fix the cause and run hoist again; it resumes safely."),
            _ => None,
        },
    }
}
