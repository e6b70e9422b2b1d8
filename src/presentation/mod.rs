//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring the run use case to its infrastructure adapters
//!
//! ## Structure
//!
//! - `cli` - Flags and how they layer over config and environment
//! - `factory` - Creates adapters and runs the use case (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use hoist::presentation::factory;
//!
//! let report = factory::run(&resolved, &sink)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen};
pub use factory::create_executor;
