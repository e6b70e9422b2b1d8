//! Hoist - provision a remote host and deploy a containerized application
//!
//! Hoist connects to a Linux host over SSH, makes sure docker and nginx are
//! installed and running, syncs a working tree, starts it with docker or
//! compose and fronts it with an nginx reverse proxy. Every step reconciles
//! against what is already on the host, so re-running is always safe.
//! `--cleanup` tears the deployment down again.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use config::Config;
pub use error::{ErrorKind, HoistError, HoistResult};
