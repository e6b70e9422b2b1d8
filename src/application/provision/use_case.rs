//! Provision Use Case

use crate::application::pipeline::StageReporter;
use crate::domain::ports::{RemoteExecutor, RemoteExecutorExt};
use crate::domain::services::provision_plan::{
    add_to_group, enable_service, in_group, package_index_update, start_service,
};
use crate::domain::services::{shell, Capability, DOCKER_GROUP, REQUIRED_CAPABILITIES};
use crate::domain::value_objects::SshUser;
use crate::error::{HoistError, HoistResult};

use super::result::ProvisionReport;

pub struct ProvisionUseCase<E: RemoteExecutor> {
    exec: E,
}

impl<E: RemoteExecutor> ProvisionUseCase<E> {
    pub fn new(exec: E) -> Self {
        Self { exec }
    }

    /// Ensure every required capability is installed, enabled and running,
    /// and that `user` can talk to the container runtime.
    pub fn execute(&self, user: &SshUser, reporter: &StageReporter<'_>) -> HoistResult<ProvisionReport> {
        let mut report = ProvisionReport::default();
        let mut index_fresh = false;

        for &cap in REQUIRED_CAPABILITIES {
            if self.exec.probe(&cap.probe())? {
                report.present.push(cap.name());
            } else {
                if !index_fresh {
                    reporter.step("refreshing package index");
                    self.exec
                        .run_checked("apt-get update", &package_index_update())?;
                    index_fresh = true;
                }
                self.install(cap, reporter)?;
                report.installed.push(cap.name());
            }

            if let Some(unit) = cap.service() {
                self.ensure_service(unit, &mut report, reporter)?;
            }
        }

        if !self.exec.probe(&in_group(user.as_str(), DOCKER_GROUP))? {
            reporter.step(format!("adding {user} to the {DOCKER_GROUP} group"));
            self.exec.run_checked(
                &format!("add {user} to {DOCKER_GROUP} group"),
                &add_to_group(user.as_str(), DOCKER_GROUP),
            )?;
            report.group_added = true;
        }

        if report.is_noop() {
            reporter.step("host already provisioned");
        }
        Ok(report)
    }

    fn install(&self, cap: Capability, reporter: &StageReporter<'_>) -> HoistResult<()> {
        let step = format!("install {}", cap.name());
        reporter.step(format!("installing {}", cap.name()));
        self.exec.run_checked(&step, &cap.install_command())?;

        // A package can install cleanly and still not provide the binary.
        if !self.exec.probe(&cap.probe())? {
            return Err(HoistError::RemoteCommand {
                step,
                status: 127,
                output: format!(
                    "{} is still unavailable after installing {}",
                    cap.name(),
                    cap.packages().join(" / ")
                ),
            });
        }
        Ok(())
    }

    fn ensure_service(
        &self,
        unit: &'static str,
        report: &mut ProvisionReport,
        reporter: &StageReporter<'_>,
    ) -> HoistResult<()> {
        if !self.exec.probe(&shell::service_enabled(unit))? {
            reporter.step(format!("enabling {unit}"));
            self.exec
                .run_checked(&format!("enable {unit}"), &enable_service(unit))?;
            report.enabled.push(unit);
        }
        if !self.exec.service_active(unit)? {
            reporter.step(format!("starting {unit}"));
            self.exec
                .run_checked(&format!("start {unit}"), &start_service(unit))?;
            report.started.push(unit);
        }
        Ok(())
    }
}
