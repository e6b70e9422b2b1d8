//! Domain Services
//!
//! Pure functions over domain values: nginx rendering, provisioning
//! descriptions and shared shell snippets. Nothing here touches the network.

pub mod proxy_config;
pub mod provision_plan;
pub mod shell;

pub use proxy_config::render_site;
pub use provision_plan::{Capability, DOCKER_GROUP, REQUIRED_CAPABILITIES};
