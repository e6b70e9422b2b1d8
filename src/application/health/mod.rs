//! Health validation
//!
//! Checks the host from the inside (units, container listing, proxy on
//! loopback) and from the operator's side (public port 80).

mod use_case;


pub use use_case::{HealthReport, HealthUseCase};
