//! Interactive prompts for values the configuration left out.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Input, Password};

use hoist::config::Prompter;
use hoist::{HoistError, HoistResult};

use crate::ui::context::UiContext;

pub struct DialoguerPrompter {
    theme: Box<dyn Theme>,
}

impl DialoguerPrompter {
    pub fn new(ui: &UiContext) -> Self {
        let theme: Box<dyn Theme> = if ui.color {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self { theme }
    }

    /// Access token for a private repository. Empty input means none.
    pub fn token(&self) -> HoistResult<Option<String>> {
        let token = Password::with_theme(self.theme.as_ref())
            .with_prompt("Repository access token (empty for public repositories)")
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)?;
        Ok(Some(token).filter(|t| !t.trim().is_empty()))
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, label: &str) -> HoistResult<String> {
        Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt(label)
            .interact_text()
            .map_err(prompt_error)
    }
}

fn prompt_error(err: dialoguer::Error) -> HoistError {
    HoistError::Io(std::io::Error::other(err.to_string()))
}
