//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `remote/` - ssh transport, docker CLI and nginx site management
//! - `sync/` - working tree acquisition (git checkout or local directory)
//! - `probe` - HTTP probe for the public health check
//! - `events/` - NDJSON event output

pub mod events;
pub mod probe;
pub mod remote;
pub mod sync;

// Re-export for convenience
pub use events::JsonEventSink;
pub use probe::ReqwestProbe;
pub use remote::{DockerCli, HostKeyPolicy, NginxSites, SshExecutor, SshOptions};
pub use sync::{resolve_local_tree, GitSync};
