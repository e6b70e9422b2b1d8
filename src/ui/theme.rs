//! Colors and glyphs for hoist's text output.
//!
//! Every glyph has an ASCII fallback, used when the terminal's locale is not
//! UTF-8 or `output.unicode = false`.

use crossterm::style::Color;

pub mod colors {
    use super::Color;

    /// Completed stages and the final summary
    pub const OK: Color = Color::Green;
    pub const FAILED: Color = Color::Red;
    /// Warnings and in-progress stages
    pub const WARNING: Color = Color::Yellow;
    /// The run header
    pub const MODE: Color = Color::Cyan;
    /// Step detail under a stage
    pub const MUTED: Color = Color::DarkGrey;
}

/// A glyph and the ASCII text that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub unicode: &'static str,
    pub ascii: &'static str,
}

impl Glyph {
    pub const fn pick(self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

pub mod glyphs {
    use super::Glyph;

    pub const SUCCESS: Glyph = Glyph { unicode: "✓", ascii: "[OK]" };
    pub const ERROR: Glyph = Glyph { unicode: "✗", ascii: "[FAIL]" };
    pub const WARNING: Glyph = Glyph { unicode: "⚠", ascii: "[WARN]" };
    pub const STAGE: Glyph = Glyph { unicode: "●", ascii: "[..]" };
    pub const STEP: Glyph = Glyph { unicode: "↳", ascii: "->" };
    pub const DEPLOY: Glyph = Glyph { unicode: "📦", ascii: "[DEPLOY]" };
    pub const CLEANUP: Glyph = Glyph { unicode: "🧹", ascii: "[CLEAN]" };
}
