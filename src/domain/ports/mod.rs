//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod container_runtime;
pub mod http_probe;
pub mod proxy_server;
pub mod remote_executor;
pub mod repository_sync;
pub mod stage_events;

pub use container_runtime::ContainerRuntime;
pub use http_probe::HttpProbe;
pub use proxy_server::ProxyServer;
pub use remote_executor::{ExecError, RemoteCommandResult, RemoteExecutor, RemoteExecutorExt};
pub use repository_sync::RepositorySync;
pub use stage_events::{Stage, StageEvent, StageEventSink};
