//! Error types for hoist
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`
//! and maps the root cause to an exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hoist operations
pub type HoistResult<T> = Result<T, HoistError>;

/// Main error type for hoist operations
#[derive(Error, Debug)]
pub enum HoistError {
    /// Malformed operator input, caught before any remote contact
    #[error("invalid {field}: {message}")]
    InputValidation { field: &'static str, message: String },

    /// SSH could not reach or authenticate against the host
    #[error("cannot reach {host}: {message}")]
    Connectivity { host: String, message: String },

    /// A remote operation exited non-zero
    #[error("{step} failed on the remote host (exit {status})\n{output}")]
    RemoteCommand {
        step: String,
        status: i32,
        output: String,
    },

    /// The proxy configuration did not pass the server's syntax check
    #[error("nginx rejected the proxy configuration:\n{output}")]
    ConfigValidation { output: String },

    /// Neither a compose file nor a Dockerfile at the working-tree root
    #[error("no docker-compose file or Dockerfile found in {path}")]
    NoApplicationDescriptor { path: PathBuf },

    /// Compose file exists but is not a usable compose document
    #[error("invalid compose file {path}: {message}")]
    InvalidComposeFile { path: PathBuf, message: String },

    /// Repository clone or update failed
    #[error("repository sync failed: {message}")]
    RepositorySync { message: String },

    /// Configuration file could not be parsed
    #[error("invalid config file {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error class, used for exit codes and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    Connectivity,
    RemoteCommand,
    ConfigValidation,
    Other,
}

impl ErrorKind {
    /// Process exit code for this class of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InputValidation => 2,
            ErrorKind::Connectivity => 3,
            ErrorKind::RemoteCommand => 4,
            ErrorKind::ConfigValidation => 5,
            ErrorKind::Other => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InputValidation => "input_validation",
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::RemoteCommand => "remote_command",
            ErrorKind::ConfigValidation => "config_validation",
            ErrorKind::Other => "other",
        }
    }
}

impl HoistError {
    pub fn input(field: &'static str, message: impl Into<String>) -> Self {
        HoistError::InputValidation {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            // A missing descriptor or broken compose file is caught locally,
            // before the host is touched.
            HoistError::InputValidation { .. }
            | HoistError::NoApplicationDescriptor { .. }
            | HoistError::InvalidComposeFile { .. }
            | HoistError::Config { .. } => ErrorKind::InputValidation,
            HoistError::Connectivity { .. } => ErrorKind::Connectivity,
            HoistError::RemoteCommand { .. } => ErrorKind::RemoteCommand,
            HoistError::ConfigValidation { .. } => ErrorKind::ConfigValidation,
            HoistError::RepositorySync { .. } | HoistError::Io(_) => ErrorKind::Other,
        }
    }
}
