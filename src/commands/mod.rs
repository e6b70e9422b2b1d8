//! Command handlers for the hoist binary.

pub mod run;

use hoist::{ErrorKind, HoistError};

/// Error class of a failed command, from its root `HoistError`.
pub fn error_kind(err: &anyhow::Error) -> ErrorKind {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<HoistError>())
        .map_or(ErrorKind::Other, HoistError::kind)
}
