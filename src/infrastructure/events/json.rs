//! JSON Event Sink
//!
//! Outputs stage events as NDJSON for CI/automation consumption. Every line
//! carries an `event` name and an RFC 3339 `timestamp`.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::application::pipeline::RunReport;
use crate::domain::ports::{StageEvent, StageEventSink};
use crate::error::ErrorKind;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Final line of a successful run.
    pub fn complete(&self, report: &RunReport) {
        let warnings: Vec<Value> = report
            .warnings()
            .map(|(stage, message)| json!({ "stage": stage.as_str(), "message": message }))
            .collect();
        let status = if warnings.is_empty() {
            "success"
        } else {
            "degraded"
        };
        self.write_event(json!({
            "event": "complete",
            "mode": report.mode.as_str(),
            "destination": report.destination,
            "status": status,
            "stages": report.stages.len(),
            "warnings": warnings,
            "elapsed_ms": report.elapsed().as_millis() as u64,
        }));
    }

    /// Final line of a failed run.
    pub fn error(&self, kind: ErrorKind, message: &str) {
        self.write_event(json!({
            "event": "error",
            "kind": kind.as_str(),
            "exit_code": kind.exit_code(),
            "message": message,
        }));
    }

    fn write_event(&self, mut event: Value) {
        if let Value::Object(map) = &mut event {
            map.insert(
                "timestamp".to_string(),
                Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl StageEventSink for JsonEventSink {
    fn on_event(&self, event: StageEvent) {
        let json = match event {
            StageEvent::RunStarted { mode, destination } => json!({
                "event": "start",
                "mode": mode.as_str(),
                "destination": destination,
            }),

            StageEvent::StageStarted { stage } => json!({
                "event": "stage_start",
                "stage": stage.as_str(),
            }),

            StageEvent::Step { stage, message } => json!({
                "event": "step",
                "stage": stage.as_str(),
                "message": message,
            }),

            StageEvent::Warning { stage, message } => json!({
                "event": "warning",
                "stage": stage.as_str(),
                "message": message,
            }),

            StageEvent::StageCompleted {
                stage,
                warnings,
                elapsed,
            } => json!({
                "event": "stage_complete",
                "stage": stage.as_str(),
                "status": if warnings == 0 { "ok" } else { "warnings" },
                "warnings": warnings,
                "elapsed_ms": elapsed.as_millis() as u64,
            }),

            StageEvent::StageFailed { stage, error } => json!({
                "event": "stage_failed",
                "stage": stage.as_str(),
                "error": error,
            }),
        };

        self.write_event(json);
    }
}
