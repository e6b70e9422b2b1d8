//! Domain Entities
//!
//! - `ApplicationDescriptor` - how the working tree is built and run
//! - `ProxyRoute` - the reverse-proxy route rendered into nginx config
//! - `ContainerRef` / `ContainerSummary` - containers seen on the host

mod app_descriptor;
mod container;
mod proxy_route;

pub use app_descriptor::{ApplicationDescriptor, COMPOSE_FILE_NAMES, DOCKERFILE_NAME};
pub use container::{ContainerRef, ContainerSummary};
pub use proxy_route::ProxyRoute;
