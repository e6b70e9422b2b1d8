//! Run mode value object.

/// Which branch of the pipeline a run executes. Chosen once, from the
/// presence of `--cleanup`; no run performs both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Deploy,
    Cleanup,
}

impl RunMode {
    pub fn from_cleanup_flag(cleanup: bool) -> Self {
        if cleanup {
            RunMode::Cleanup
        } else {
            RunMode::Deploy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Deploy => "deploy",
            RunMode::Cleanup => "cleanup",
        }
    }
}
