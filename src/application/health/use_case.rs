//! Health Use Case

use crate::application::pipeline::StageReporter;
use crate::domain::ports::{ContainerRuntime, HttpProbe, RemoteExecutor, RemoteExecutorExt};
use crate::domain::services::shell::{is_success_or_redirect, is_upstream_failure};
use crate::domain::value_objects::{HostAddress, PROXY_LISTEN_PORT};
use crate::error::{HoistError, HoistResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Running containers at check time
    pub containers: usize,
    /// Proxy answer on the host's loopback
    pub proxy_status: u16,
    /// Public answer seen from the operator's machine
    pub public_status: Option<u16>,
}

pub struct HealthUseCase<E, C, H>
where
    E: RemoteExecutor,
    C: ContainerRuntime,
    H: HttpProbe,
{
    exec: E,
    runtime: C,
    probe: H,
}

impl<E, C, H> HealthUseCase<E, C, H>
where
    E: RemoteExecutor,
    C: ContainerRuntime,
    H: HttpProbe,
{
    pub fn new(exec: E, runtime: C, probe: H) -> Self {
        Self {
            exec,
            runtime,
            probe,
        }
    }

    pub fn execute(&self, host: &HostAddress, reporter: &StageReporter<'_>) -> HoistResult<HealthReport> {
        self.require_active("docker")?;

        let containers = self.runtime.list_running()?.len();
        reporter.step(format!("{containers} container(s) running"));

        self.require_active("nginx")?;

        let proxy_status = match self.exec.loopback_http_status(PROXY_LISTEN_PORT)? {
            Some(code) if is_success_or_redirect(code) => {
                reporter.step(format!("proxy answered HTTP {code} on loopback"));
                code
            }
            // nginx is up and routing; the upstream is what failed.
            Some(code) if is_upstream_failure(code) => {
                reporter.warn(format!(
                    "proxy answered HTTP {code} on loopback: the application behind it is not responding"
                ));
                code
            }
            other => {
                return Err(HoistError::RemoteCommand {
                    step: "proxy loopback check".to_string(),
                    status: 1,
                    output: match other {
                        Some(code) => format!("http://127.0.0.1:{PROXY_LISTEN_PORT}/ answered HTTP {code}"),
                        None => format!("nothing answered on http://127.0.0.1:{PROXY_LISTEN_PORT}/"),
                    },
                })
            }
        };

        let url = format!("http://{host}:{PROXY_LISTEN_PORT}/");
        let public_status = match self.probe.status(&url) {
            Ok(code) if is_success_or_redirect(code) => {
                reporter.step(format!("{url} answered HTTP {code}"));
                Some(code)
            }
            Ok(code) => {
                reporter.warn(format!("{url} answered HTTP {code}"));
                Some(code)
            }
            Err(reason) => {
                // Firewalls and NAT often block this while the host is fine.
                reporter.warn(format!("{url} is not reachable from here: {reason}"));
                None
            }
        };

        Ok(HealthReport {
            containers,
            proxy_status,
            public_status,
        })
    }

    fn require_active(&self, unit: &str) -> HoistResult<()> {
        if self.exec.service_active(unit)? {
            Ok(())
        } else {
            Err(HoistError::RemoteCommand {
                step: format!("{unit} service check"),
                status: 3,
                output: format!("{unit} is not active"),
            })
        }
    }
}
