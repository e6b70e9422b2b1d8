//! Environment provisioning
//!
//! Brings a fresh or partially set up host to the point where containers
//! and the proxy can be deployed. Every step probes before acting.

mod result;
mod use_case;


pub use result::ProvisionReport;
pub use use_case::ProvisionUseCase;
