use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Deploy,
    Clean,
}

impl Icon {
    fn glyph(self) -> theme::Glyph {
        match self {
            Icon::Success => theme::glyphs::SUCCESS,
            Icon::Error => theme::glyphs::ERROR,
            Icon::Warning => theme::glyphs::WARNING,
            Icon::Progress => theme::glyphs::STAGE,
            Icon::Arrow => theme::glyphs::STEP,
            Icon::Deploy => theme::glyphs::DEPLOY,
            Icon::Clean => theme::glyphs::CLEANUP,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        self.glyph().pick(supports_unicode)
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::OK,
            Icon::Error => theme::colors::FAILED,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Arrow => theme::colors::MUTED,
            Icon::Deploy | Icon::Clean => theme::colors::MODE,
        };
        format!("{}", s.with(color))
    }
}
