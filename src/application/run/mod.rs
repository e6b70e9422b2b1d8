//! Run composition
//!
//! Wires the stage use cases into the two run modes:
//!
//! - deploy: sync → provision → deploy → proxy → health
//! - cleanup: teardown only, no sync

mod request;
mod use_case;


pub use request::{RunPorts, RunRequest, SourceTree};
pub use use_case::RunUseCase;
