//! Proxy route entity - one public listener forwarding to the app port.

use crate::domain::value_objects::{AppPort, ServerName, PROXY_LISTEN_PORT};

/// The single route the reverse proxy serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    pub listen_port: u16,
    pub server_name: ServerName,
    pub upstream_port: AppPort,
}

impl ProxyRoute {
    pub fn new(server_name: ServerName, upstream_port: AppPort) -> Self {
        Self {
            listen_port: PROXY_LISTEN_PORT,
            server_name,
            upstream_port,
        }
    }

    /// `127.0.0.1:<port>`; the app is only ever reached over loopback.
    pub fn upstream(&self) -> String {
        format!("127.0.0.1:{}", self.upstream_port)
    }
}
