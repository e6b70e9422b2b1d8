//! Stage pipeline
//!
//! Runs stages in order and turns each into an explicit result. A stage
//! either completes (possibly with warnings) or fails; the first failure
//! stops the run. Events go to the sink as they happen so the operator sees
//! progress live.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::domain::ports::{Stage, StageEvent, StageEventSink};
use crate::domain::value_objects::RunMode;
use crate::error::HoistResult;

/// Handle a use case uses to report progress inside its stage.
pub struct StageReporter<'a> {
    stage: Stage,
    sink: &'a dyn StageEventSink,
    warnings: RefCell<Vec<String>>,
}

impl<'a> StageReporter<'a> {
    pub fn new(stage: Stage, sink: &'a dyn StageEventSink) -> Self {
        Self {
            stage,
            sink,
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn step(&self, message: impl Into<String>) {
        let message = message.into();
        info!(stage = %self.stage, "{message}");
        self.sink.on_event(StageEvent::Step {
            stage: self.stage,
            message,
        });
    }

    /// Record a non-fatal problem. The stage still completes.
    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(stage = %self.stage, "{message}");
        self.warnings.borrow_mut().push(message.clone());
        self.sink.on_event(StageEvent::Warning {
            stage: self.stage,
            message,
        });
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }
}

/// How a stage ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    CompletedWithWarnings(Vec<String>),
}

impl StageOutcome {
    fn from_warnings(warnings: Vec<String>) -> Self {
        if warnings.is_empty() {
            StageOutcome::Completed
        } else {
            StageOutcome::CompletedWithWarnings(warnings)
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            StageOutcome::Completed => &[],
            StageOutcome::CompletedWithWarnings(w) => w,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub elapsed: Duration,
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: RunMode,
    pub destination: String,
    pub stages: Vec<StageReport>,
}

impl RunReport {
    pub fn warnings(&self) -> impl Iterator<Item = (Stage, &str)> {
        self.stages
            .iter()
            .flat_map(|r| r.outcome.warnings().iter().map(move |w| (r.stage, w.as_str())))
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn elapsed(&self) -> Duration {
        self.stages.iter().map(|s| s.elapsed).sum()
    }
}

/// Sequential stage runner for one run.
pub struct Pipeline<'a> {
    mode: RunMode,
    destination: String,
    sink: &'a dyn StageEventSink,
    reports: Vec<StageReport>,
}

impl<'a> Pipeline<'a> {
    pub fn start(mode: RunMode, destination: impl Into<String>, sink: &'a dyn StageEventSink) -> Self {
        let destination = destination.into();
        info!("{} run against {}", mode.as_str(), destination);
        sink.on_event(StageEvent::RunStarted {
            mode,
            destination: destination.clone(),
        });
        Self {
            mode,
            destination,
            sink,
            reports: Vec::new(),
        }
    }

    /// Run one stage. A failure is reported to the sink and returned as-is.
    pub fn stage<T>(
        &mut self,
        stage: Stage,
        body: impl FnOnce(&StageReporter<'_>) -> HoistResult<T>,
    ) -> HoistResult<T> {
        info!("stage {} started", stage);
        self.sink.on_event(StageEvent::StageStarted { stage });
        let reporter = StageReporter::new(stage, self.sink);
        let started = Instant::now();

        match body(&reporter) {
            Ok(value) => {
                let elapsed = started.elapsed();
                let warnings = reporter.warnings();
                self.sink.on_event(StageEvent::StageCompleted {
                    stage,
                    warnings: warnings.len(),
                    elapsed,
                });
                info!("stage {} completed in {:?}", stage, elapsed);
                self.reports.push(StageReport {
                    stage,
                    outcome: StageOutcome::from_warnings(warnings),
                    elapsed,
                });
                Ok(value)
            }
            Err(err) => {
                self.sink.on_event(StageEvent::StageFailed {
                    stage,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub fn finish(self) -> RunReport {
        RunReport {
            mode: self.mode,
            destination: self.destination,
            stages: self.reports,
        }
    }
}
