//! Event Sink Implementations
//!
//! Concrete implementations of `StageEventSink` that are not tied to the
//! terminal:
//! - JsonEventSink: NDJSON output for CI/automation

mod json;

pub use json::JsonEventSink;
