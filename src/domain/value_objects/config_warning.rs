//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

/// Unknown key found while loading `hoist.toml`.
///
/// Loading still succeeds; the warning is shown before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key (e.g. `target.hostname`)
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line, when the key text could be located
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}
