//! Proxy Use Case

use crate::application::pipeline::StageReporter;
use crate::domain::entities::ProxyRoute;
use crate::domain::ports::ProxyServer;
use crate::domain::services::render_site;
use crate::error::{HoistError, HoistResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyReport {
    pub server_name: String,
    pub upstream: String,
    /// The site file as installed
    pub rendered: String,
}

pub struct ProxyUseCase<P: ProxyServer> {
    proxy: P,
}

impl<P: ProxyServer> ProxyUseCase<P> {
    pub fn new(proxy: P) -> Self {
        Self { proxy }
    }

    pub fn execute(&self, route: &ProxyRoute, reporter: &StageReporter<'_>) -> HoistResult<ProxyReport> {
        let rendered = render_site(route);

        reporter.step(format!(
            "routing {} on port {} to {}",
            route.server_name.as_str(),
            route.listen_port,
            route.upstream()
        ));
        self.proxy.install_site(&rendered)?;
        self.proxy.remove_default_site()?;
        self.proxy.relink_site()?;

        if let Err(output) = self.proxy.validate()? {
            return Err(HoistError::ConfigValidation { output });
        }
        reporter.step("configuration test passed, reloading nginx");
        self.proxy.reload()?;

        Ok(ProxyReport {
            server_name: route.server_name.as_str().to_string(),
            upstream: route.upstream(),
            rendered,
        })
    }
}
