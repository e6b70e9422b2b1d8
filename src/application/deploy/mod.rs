//! Deploy Module
//!
//! Turns a synchronized working tree into running containers on the host.
//!
//! ## Structure
//!
//! - `detect` - Local classification of the tree (`detect_descriptor`)
//! - `options` - Tunables (`DeployOptions`)
//! - `result` - What happened (`DeployReport`)
//! - `use_case` - Pre-clean, transfer, build/run, post-run check (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hoist::application::deploy::{detect_descriptor, DeployOptions, DeployUseCase};
//!
//! let descriptor = detect_descriptor(&tree, &layout.workload_name())?;
//! let use_case = DeployUseCase::new(executor, runtime, DeployOptions::default());
//! let report = use_case.execute(&target, &tree, &descriptor, &reporter)?;
//! ```

mod detect;
mod options;
mod result;
mod use_case;


pub use detect::detect_descriptor;
pub use options::{DeployOptions, DEFAULT_LOG_TAIL_LINES, DEFAULT_STARTUP_DELAY_SECS};
pub use result::DeployReport;
pub use use_case::DeployUseCase;
