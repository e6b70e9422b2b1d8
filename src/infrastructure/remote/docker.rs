//! Docker CLI adapter
//!
//! Implements the `ContainerRuntime` port by running `docker` on the remote
//! host through any `RemoteExecutor`.

use std::cell::OnceCell;

use tracing::debug;

use crate::domain::entities::{ContainerRef, ContainerSummary};
use crate::domain::ports::{ContainerRuntime, RemoteExecutor, RemoteExecutorExt};
use crate::domain::services::shell::quote;
use crate::domain::value_objects::AppPort;
use crate::error::HoistResult;

const REF_FORMAT: &str = "'{{.ID}}\\t{{.Names}}'";
const BINDING_FORMAT: &str = "'{{.ID}}\\t{{.Names}}\\t{{.Ports}}'";
const SUMMARY_FORMAT: &str = "'{{.ID}}\\t{{.Names}}\\t{{.Image}}\\t{{.Status}}\\t{{.Ports}}'";

/// Which compose front-end the host has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeCommand {
    /// `docker compose`
    Plugin,
    /// standalone `docker-compose`
    Legacy,
}

impl ComposeCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            ComposeCommand::Plugin => "docker compose",
            ComposeCommand::Legacy => "docker-compose",
        }
    }
}

/// `ContainerRuntime` over the remote `docker` CLI
pub struct DockerCli<E> {
    exec: E,
    /// Detected once per run, on first compose use
    compose: OnceCell<ComposeCommand>,
}

impl<E: RemoteExecutor> DockerCli<E> {
    pub fn new(exec: E) -> Self {
        Self {
            exec,
            compose: OnceCell::new(),
        }
    }

    fn compose_command(&self) -> HoistResult<ComposeCommand> {
        if let Some(cmd) = self.compose.get() {
            return Ok(*cmd);
        }
        let cmd = if self.exec.probe("docker compose version >/dev/null 2>&1")? {
            ComposeCommand::Plugin
        } else {
            ComposeCommand::Legacy
        };
        debug!("compose front-end: {}", cmd.as_str());
        let _ = self.compose.set(cmd);
        Ok(cmd)
    }

    fn refs(&self, step: &str, script: &str) -> HoistResult<Vec<ContainerRef>> {
        let result = self.exec.run_checked(step, script)?;
        Ok(parse_refs(&result.output))
    }
}

impl<E: RemoteExecutor> ContainerRuntime for DockerCli<E> {
    fn containers_publishing(&self, port: AppPort) -> HoistResult<Vec<ContainerRef>> {
        // `--filter publish=` matches the container side of a binding, so
        // read the bindings and match the host side here.
        let result = self.exec.run_checked(
            "list containers by port",
            &format!("docker ps -a --format {BINDING_FORMAT}"),
        )?;
        Ok(result
            .output
            .lines()
            .filter_map(|line| {
                let mut cols = line.trim().splitn(3, '\t');
                let id = cols.next()?;
                let name = cols.next()?;
                binds_host_port(cols.next().unwrap_or_default(), port.get()).then(|| ContainerRef {
                    id: id.to_string(),
                    name: name.to_string(),
                })
            })
            .collect())
    }

    fn container_named(&self, name: &str) -> HoistResult<Option<ContainerRef>> {
        // The name filter is a substring match; narrow it to an exact one.
        let refs = self.refs(
            "list containers by name",
            &format!("docker ps -a --filter name={} --format {REF_FORMAT}", quote(name)),
        )?;
        Ok(refs.into_iter().find(|c| c.name == name))
    }

    fn remove_containers(&self, containers: &[ContainerRef]) -> HoistResult<()> {
        if containers.is_empty() {
            return Ok(());
        }
        let ids = containers
            .iter()
            .map(|c| quote(&c.id))
            .collect::<Vec<_>>()
            .join(" ");
        self.exec
            .run_checked("docker stop", &format!("docker stop {ids} >/dev/null"))?;
        self.exec
            .run_checked("docker rm", &format!("docker rm {ids} >/dev/null"))?;
        Ok(())
    }

    fn all_containers(&self) -> HoistResult<Vec<ContainerRef>> {
        let result = self.exec.run_checked("docker ps -aq", "docker ps -aq")?;
        Ok(result
            .output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|id| ContainerRef {
                id: id.to_string(),
                name: String::new(),
            })
            .collect())
    }

    fn prune_networks(&self) -> HoistResult<()> {
        self.exec
            .run_checked("docker network prune", "docker network prune -f")?;
        Ok(())
    }

    fn prune_images(&self) -> HoistResult<()> {
        self.exec
            .run_checked("docker image prune", "docker image prune -af")?;
        Ok(())
    }

    fn compose_up(&self, app_dir: &str, compose_file: &str) -> HoistResult<()> {
        let compose = self.compose_command()?.as_str();
        let base = format!("cd {} && {compose} -f {}", quote(app_dir), quote(compose_file));
        // Build-only services have nothing to pull.
        self.exec.run_checked(
            &format!("{compose} pull"),
            &format!("{base} pull --ignore-pull-failures"),
        )?;
        self.exec
            .run_checked(&format!("{compose} build"), &format!("{base} build"))?;
        self.exec
            .run_checked(&format!("{compose} up"), &format!("{base} up -d"))?;
        Ok(())
    }

    fn build_image(&self, app_dir: &str, image: &str) -> HoistResult<()> {
        self.exec.run_checked(
            "docker build",
            &format!("cd {} && docker build -t {} .", quote(app_dir), quote(image)),
        )?;
        Ok(())
    }

    fn run_container(&self, image: &str, name: &str, port: AppPort) -> HoistResult<()> {
        self.exec.run_checked(
            "docker run",
            &format!(
                "docker run -d --name {} --restart unless-stopped -p {port}:{port} {}",
                quote(name),
                quote(image)
            ),
        )?;
        Ok(())
    }

    fn list_running(&self) -> HoistResult<Vec<ContainerSummary>> {
        let result = self
            .exec
            .run_checked("docker ps", &format!("docker ps --format {SUMMARY_FORMAT}"))?;
        Ok(parse_summaries(&result.output))
    }

    fn logs_tail(&self, container: &ContainerRef, lines: usize) -> HoistResult<String> {
        let result = self.exec.run_checked(
            "docker logs",
            &format!("docker logs --tail {lines} {} 2>&1", quote(&container.id)),
        )?;
        Ok(result.output)
    }
}

/// Whether a `{{.Ports}}` column binds `port` on the host, e.g.
/// `0.0.0.0:8080->80/tcp, [::]:8080->80/tcp` or `0.0.0.0:8000-8090->8000-8090/tcp`.
fn binds_host_port(ports: &str, port: u16) -> bool {
    ports.split(", ").any(|binding| {
        let Some((host_side, _)) = binding.split_once("->") else {
            return false;
        };
        let Some((_, host_ports)) = host_side.rsplit_once(':') else {
            return false;
        };
        match host_ports.split_once('-') {
            Some((low, high)) => match (low.parse::<u16>(), high.parse::<u16>()) {
                (Ok(low), Ok(high)) => (low..=high).contains(&port),
                _ => false,
            },
            None => host_ports.parse::<u16>() == Ok(port),
        }
    })
}

fn parse_refs(output: &str) -> Vec<ContainerRef> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let mut cols = line.trim().splitn(2, '\t');
            ContainerRef {
                id: cols.next().unwrap_or_default().to_string(),
                name: cols.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}

fn parse_summaries(output: &str) -> Vec<ContainerSummary> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let mut cols = line.trim_end().split('\t').map(str::to_string);
            ContainerSummary {
                id: cols.next().unwrap_or_default(),
                name: cols.next().unwrap_or_default(),
                image: cols.next().unwrap_or_default(),
                status: cols.next().unwrap_or_default(),
                ports: cols.next().unwrap_or_default(),
            }
        })
        .collect()
}
