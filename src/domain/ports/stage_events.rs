//! Stage Event Port
//!
//! Observable progress for a run. Drives the text view, the NDJSON
//! stream, and tests that assert on ordering.

use std::fmt;
use std::time::Duration;

use crate::domain::value_objects::RunMode;

/// Pipeline stage, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Sync,
    Provision,
    Deploy,
    Proxy,
    Health,
    Cleanup,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Sync => "sync",
            Stage::Provision => "provision",
            Stage::Deploy => "deploy",
            Stage::Proxy => "proxy",
            Stage::Health => "health",
            Stage::Cleanup => "cleanup",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Sync => "Repository sync",
            Stage::Provision => "Environment provisioning",
            Stage::Deploy => "Application deploy",
            Stage::Proxy => "Reverse proxy",
            Stage::Health => "Health validation",
            Stage::Cleanup => "Cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event emitted during a run
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    RunStarted {
        mode: RunMode,
        destination: String,
    },

    StageStarted {
        stage: Stage,
    },

    /// Something happened inside a stage that the operator should see
    Step {
        stage: Stage,
        message: String,
    },

    /// Non-fatal problem; the run continues
    Warning {
        stage: Stage,
        message: String,
    },

    StageCompleted {
        stage: Stage,
        warnings: usize,
        elapsed: Duration,
    },

    StageFailed {
        stage: Stage,
        error: String,
    },
}

/// Trait for receiving stage events
///
/// Implementations:
/// - `TextEventSink`: human-readable progress on stdout
/// - `JsonEventSink`: NDJSON event stream for CI
pub trait StageEventSink {
    fn on_event(&self, event: StageEvent);
}

impl<T: StageEventSink + ?Sized> StageEventSink for &T {
    fn on_event(&self, event: StageEvent) {
        (**self).on_event(event)
    }
}
