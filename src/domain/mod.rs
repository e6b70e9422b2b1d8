//! Domain Layer
//!
//! The deployment model without I/O: validated inputs, the entities a run
//! reasons about, pure rendering/planning services, and the ports through
//! which the application layer reaches the remote host.
//!
//! ## Structure
//!
//! - `value_objects/` - Validated inputs and fixed layout (HostAddress, AppPort, RemoteLayout)
//! - `entities/` - ApplicationDescriptor, ProxyRoute, containers
//! - `services/` - nginx rendering, provisioning plan, shell snippets
//! - `ports/` - RemoteExecutor, ContainerRuntime, ProxyServer, HttpProbe, RepositorySync

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
