//! Clean Use Case

use tracing::debug;

use crate::application::pipeline::StageReporter;
use crate::domain::ports::{ContainerRuntime, ProxyServer, RemoteExecutor, RemoteExecutorExt};
use crate::domain::services::shell;
use crate::domain::value_objects::RemoteLayout;
use crate::error::{HoistError, HoistResult};

use super::result::{CleanReport, CleanStep, StepOutcome};

pub const STEP_CONTAINERS: &str = "remove containers";
pub const STEP_IMAGES: &str = "prune images";
pub const STEP_NETWORKS: &str = "prune networks";
pub const STEP_SITE: &str = "remove proxy site";
pub const STEP_RELOAD: &str = "reload nginx";
pub const STEP_APP_DIR: &str = "remove app directory";

pub struct CleanUseCase<E, C, P>
where
    E: RemoteExecutor,
    C: ContainerRuntime,
    P: ProxyServer,
{
    exec: E,
    runtime: C,
    proxy: P,
}

impl<E, C, P> CleanUseCase<E, C, P>
where
    E: RemoteExecutor,
    C: ContainerRuntime,
    P: ProxyServer,
{
    pub fn new(exec: E, runtime: C, proxy: P) -> Self {
        Self {
            exec,
            runtime,
            proxy,
        }
    }

    /// Listing containers is the only step whose failure aborts. Later steps
    /// record failures as warnings, except a lost connection, which ends the
    /// run because nothing further can succeed.
    pub fn execute(&self, layout: &RemoteLayout, reporter: &StageReporter<'_>) -> HoistResult<CleanReport> {
        let mut report = CleanReport::default();

        let containers = self.runtime.all_containers()?;
        if containers.is_empty() {
            debug!("no containers on host");
            report.push(STEP_CONTAINERS, StepOutcome::Skipped);
        } else {
            reporter.step(format!("removing {} container(s)", containers.len()));
            let outcome = best_effort(reporter, STEP_CONTAINERS, self.runtime.remove_containers(&containers))?;
            if outcome == StepOutcome::Done {
                report.containers_removed = containers.len();
            }
            report.push(STEP_CONTAINERS, outcome);
        }

        reporter.step("pruning images and networks");
        let outcome = best_effort(reporter, STEP_IMAGES, self.runtime.prune_images())?;
        report.push(STEP_IMAGES, outcome);
        let outcome = best_effort(reporter, STEP_NETWORKS, self.runtime.prune_networks())?;
        report.push(STEP_NETWORKS, outcome);

        reporter.step("removing proxy site");
        let outcome = best_effort(reporter, STEP_SITE, self.proxy.remove_site())?;
        report.push(STEP_SITE, outcome);
        let outcome = best_effort(reporter, STEP_RELOAD, self.proxy.reload())?;
        report.push(STEP_RELOAD, outcome);

        reporter.step(format!("removing {}", layout.app_dir()));
        let removed = self
            .exec
            .run_checked(STEP_APP_DIR, &shell::remove_tree(layout.app_dir()))
            .map(|_| ());
        let outcome = best_effort(reporter, STEP_APP_DIR, removed)?;
        report.push(STEP_APP_DIR, outcome);

        Ok(report)
    }
}

impl CleanReport {
    fn push(&mut self, name: &'static str, outcome: StepOutcome) {
        self.steps.push(CleanStep { name, outcome });
    }
}

/// Turn a step failure into a warning, unless the host is gone.
fn best_effort(reporter: &StageReporter<'_>, step: &str, result: HoistResult<()>) -> HoistResult<StepOutcome> {
    match result {
        Ok(()) => Ok(StepOutcome::Done),
        Err(err @ HoistError::Connectivity { .. }) => Err(err),
        Err(err) => {
            reporter.warn(format!("{step} failed: {err}"));
            Ok(StepOutcome::Failed(err.to_string()))
        }
    }
}
