//! Clean Use Case
//!
//! Tears down what deploys created on the host:
//! - containers, then unused images and networks
//! - the `app_proxy` site, followed by an nginx reload
//! - the application directory
//!
//! Packages, units and group membership are left in place.

mod result;
mod use_case;


pub use result::{CleanReport, CleanStep, StepOutcome};
pub use use_case::CleanUseCase;
