use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use hoist::config::{ColorMode, Config};
use hoist::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    /// Missing values may be asked for
    pub interactive: bool,
}

impl UiContext {
    pub fn new(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        non_interactive: bool,
        config: &Config,
    ) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, non_interactive, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        non_interactive: bool,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        let interactive = !non_interactive && !json && caps.stdin_tty && !caps.is_ci;

        Self {
            json,
            verbose,
            caps,
            color,
            unicode,
            interactive,
        }
    }
}
