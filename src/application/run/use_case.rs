//! Run Use Case

use std::path::PathBuf;

use crate::application::clean::CleanUseCase;
use crate::application::deploy::{detect_descriptor, DeployUseCase};
use crate::application::health::HealthUseCase;
use crate::application::pipeline::{Pipeline, RunReport, StageReporter};
use crate::application::provision::ProvisionUseCase;
use crate::application::proxy::ProxyUseCase;
use crate::domain::entities::{ApplicationDescriptor, ProxyRoute};
use crate::domain::ports::{Stage, StageEventSink};
use crate::domain::value_objects::{RemoteLayout, RunMode};
use crate::error::{HoistError, HoistResult};

use super::request::{RunPorts, RunRequest, SourceTree};

pub struct RunUseCase<'a> {
    ports: RunPorts<'a>,
}

impl<'a> RunUseCase<'a> {
    pub fn new(ports: RunPorts<'a>) -> Self {
        Self { ports }
    }

    pub fn execute(&self, request: &RunRequest, sink: &dyn StageEventSink) -> HoistResult<RunReport> {
        match request.mode {
            RunMode::Deploy => self.deploy(request, sink),
            RunMode::Cleanup => self.cleanup(request, sink),
        }
    }

    fn deploy(&self, request: &RunRequest, sink: &dyn StageEventSink) -> HoistResult<RunReport> {
        let target = &request.target;
        let layout = target.layout();
        let source = request
            .source
            .as_ref()
            .ok_or_else(|| HoistError::input("repository", "a repository URL or --source is required"))?;
        let ports = &self.ports;

        let mut pipeline = Pipeline::start(RunMode::Deploy, target.destination(), sink);

        let (tree, descriptor) = pipeline.stage(Stage::Sync, |r| self.sync(source, &layout, r))?;

        pipeline.stage(Stage::Provision, |r| {
            ProvisionUseCase::new(ports.exec).execute(&target.user, r)
        })?;

        pipeline.stage(Stage::Deploy, |r| {
            DeployUseCase::new(ports.exec, ports.runtime, request.deploy.clone())
                .execute(target, &tree, &descriptor, r)
        })?;

        let route = ProxyRoute::new(target.server_name(), target.port);
        pipeline.stage(Stage::Proxy, |r| ProxyUseCase::new(ports.proxy).execute(&route, r))?;

        pipeline.stage(Stage::Health, |r| {
            HealthUseCase::new(ports.exec, ports.runtime, ports.probe).execute(&target.host, r)
        })?;

        Ok(pipeline.finish())
    }

    fn cleanup(&self, request: &RunRequest, sink: &dyn StageEventSink) -> HoistResult<RunReport> {
        let layout = request.target.layout();
        let ports = &self.ports;
        let mut pipeline = Pipeline::start(RunMode::Cleanup, request.target.destination(), sink);

        pipeline.stage(Stage::Cleanup, |r| {
            CleanUseCase::new(ports.exec, ports.runtime, ports.proxy).execute(&layout, r)
        })?;

        Ok(pipeline.finish())
    }

    /// Produce the working tree and classify it, all locally.
    fn sync(
        &self,
        source: &SourceTree,
        layout: &RemoteLayout,
        reporter: &StageReporter<'_>,
    ) -> HoistResult<(PathBuf, ApplicationDescriptor)> {
        let tree = match source {
            SourceTree::Repository { repo, token } => {
                reporter.step(format!("syncing {} ({})", repo.url, repo.branch));
                self.ports.repository.sync(repo, token.as_deref())?
            }
            SourceTree::Local(path) => {
                reporter.step(format!("using local tree {}", path.display()));
                path.clone()
            }
        };

        let descriptor = detect_descriptor(&tree, &layout.workload_name())?;
        reporter.step(format!(
            "found {} ({})",
            descriptor.descriptor_path().display(),
            descriptor.kind()
        ));
        Ok((tree, descriptor))
    }
}
