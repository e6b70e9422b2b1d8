//! Deploy Use Case
//!
//! 1. Pre-deploy pass: remove whatever holds the app port or the workload name
//! 2. Transfer the working tree to the app directory
//! 3. Build and start the workload
//! 4. Post-run check on the app port (warning only)

use std::path::Path;

use tracing::debug;

use crate::application::pipeline::StageReporter;
use crate::domain::entities::{ApplicationDescriptor, ContainerRef};
use crate::domain::ports::{ContainerRuntime, RemoteExecutor, RemoteExecutorExt};
use crate::domain::services::shell;
use crate::domain::value_objects::{DeploymentTarget, TRANSFER_EXCLUDES};
use crate::error::{HoistError, HoistResult};

use super::options::DeployOptions;
use super::result::DeployReport;

pub struct DeployUseCase<E, C>
where
    E: RemoteExecutor,
    C: ContainerRuntime,
{
    exec: E,
    runtime: C,
    options: DeployOptions,
}

impl<E, C> DeployUseCase<E, C>
where
    E: RemoteExecutor,
    C: ContainerRuntime,
{
    pub fn new(exec: E, runtime: C, options: DeployOptions) -> Self {
        Self {
            exec,
            runtime,
            options,
        }
    }

    pub fn execute(
        &self,
        target: &DeploymentTarget,
        tree: &Path,
        descriptor: &ApplicationDescriptor,
        reporter: &StageReporter<'_>,
    ) -> HoistResult<DeployReport> {
        let layout = target.layout();
        let mut report = DeployReport {
            descriptor_kind: descriptor.kind(),
            ..DeployReport::default()
        };

        report.replaced = self.remove_previous(target, &layout.workload_name(), reporter)?;

        reporter.step(format!("transferring {} to {}", tree.display(), layout.app_dir()));
        self.exec
            .run_checked("create app directory", &shell::make_dir(layout.app_dir()))?;
        let transfer = self
            .exec
            .sync_tree(tree, layout.app_dir(), TRANSFER_EXCLUDES)
            .map_err(|e| self.exec.connectivity(e))?;
        if !transfer.success() {
            return Err(HoistError::RemoteCommand {
                step: "transfer".to_string(),
                status: transfer.status,
                output: transfer.output.trim().to_string(),
            });
        }

        match descriptor {
            ApplicationDescriptor::ComposeStack { services, .. } => {
                let file = descriptor.compose_file_name().unwrap_or_default();
                reporter.step(format!(
                    "starting compose stack ({}) from {file}",
                    services.join(", ")
                ));
                self.runtime.compose_up(layout.app_dir(), file)?;
            }
            ApplicationDescriptor::SingleContainer { image, .. } => {
                reporter.step(format!("building image {image}"));
                self.runtime.build_image(layout.app_dir(), image)?;
                reporter.step(format!("starting container {image} on port {}", target.port));
                self.runtime.run_container(image, image, target.port)?;
            }
        }

        self.check_started(target, &mut report, reporter)?;
        Ok(report)
    }

    /// Stop and remove containers publishing the app port or carrying the
    /// workload name, then prune networks they leave behind.
    fn remove_previous(
        &self,
        target: &DeploymentTarget,
        workload: &str,
        reporter: &StageReporter<'_>,
    ) -> HoistResult<Vec<ContainerRef>> {
        let mut stale = self.runtime.containers_publishing(target.port)?;
        if let Some(named) = self.runtime.container_named(workload)? {
            if !stale.iter().any(|c| c.id == named.id) {
                stale.push(named);
            }
        }

        if stale.is_empty() {
            debug!("no previous containers on port {}", target.port);
        } else {
            let names: Vec<String> = stale.iter().map(ToString::to_string).collect();
            reporter.step(format!("removing previous containers: {}", names.join(", ")));
            self.runtime.remove_containers(&stale)?;
        }
        self.runtime.prune_networks()?;
        Ok(stale)
    }

    fn check_started(
        &self,
        target: &DeploymentTarget,
        report: &mut DeployReport,
        reporter: &StageReporter<'_>,
    ) -> HoistResult<()> {
        report.running = self.runtime.list_running()?;
        for c in &report.running {
            reporter.step(format!("running: {} ({}) {}", c.name, c.image, c.status));
        }

        if !self.options.startup_delay.is_zero() {
            debug!("waiting {:?} for start-up", self.options.startup_delay);
            std::thread::sleep(self.options.startup_delay);
        }

        report.loopback_status = self.exec.loopback_http_status(target.port.get())?;
        if report.app_answered() {
            return Ok(());
        }

        let mut message = match report.loopback_status {
            Some(code) => format!("application on port {} answered HTTP {code}", target.port),
            None => format!("application is not answering on port {}", target.port),
        };
        if let Some(newest) = report.running.first() {
            let logs = self
                .runtime
                .logs_tail(&newest.to_ref(), self.options.log_tail_lines)
                .unwrap_or_else(|e| format!("(logs unavailable: {e})"));
            message.push_str(&format!(
                "\nlast {} log lines of {}:\n{}",
                self.options.log_tail_lines,
                newest.name,
                logs.trim_end()
            ));
        }
        reporter.warn(message);
        Ok(())
    }
}
