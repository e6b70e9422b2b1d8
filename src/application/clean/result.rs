//! Clean result types

use std::fmt;

/// How one teardown step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// Nothing to act on
    Skipped,
    /// Failed; teardown carried on
    Failed(String),
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Done => write!(f, "done"),
            StepOutcome::Skipped => write!(f, "skipped"),
            StepOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanStep {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

/// Result of a cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub steps: Vec<CleanStep>,
    pub containers_removed: usize,
}

impl CleanReport {
    pub fn outcome(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name).map(|s| &s.outcome)
    }

    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed(_)))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}
