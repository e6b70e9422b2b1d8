//! Adapter Factory
//!
//! Creates the infrastructure adapters for one run and hands them to the
//! run use case. This is the dependency injection point for the application.

use crate::application::{RunPorts, RunReport, RunUseCase};
use crate::config::ResolvedRun;
use crate::domain::ports::StageEventSink;
use crate::error::HoistResult;
use crate::infrastructure::{
    DockerCli, GitSync, HostKeyPolicy, NginxSites, ReqwestProbe, SshExecutor, SshOptions,
};

/// Create the ssh executor every remote adapter shares.
pub fn create_executor(resolved: &ResolvedRun) -> SshExecutor {
    let target = &resolved.request.target;
    let host_key = match &resolved.known_hosts {
        Some(file) => HostKeyPolicy::Pinned(file.clone()),
        None => HostKeyPolicy::AcceptNew,
    };
    SshExecutor::new(
        target.destination(),
        SshOptions {
            key: target.key.clone(),
            host_key,
            connect_timeout: resolved.connect_timeout,
            command_timeout: resolved.command_timeout,
        },
    )
}

/// Run the resolved request against the real host.
pub fn run(resolved: &ResolvedRun, sink: &dyn StageEventSink) -> HoistResult<RunReport> {
    let exec = create_executor(resolved);
    let runtime = DockerCli::new(&exec);
    let proxy = NginxSites::new(&exec, resolved.request.target.layout());
    let probe = ReqwestProbe::new(resolved.probe_timeout);
    let repository = GitSync::new(GitSync::default_root());

    let ports = RunPorts {
        exec: &exec,
        runtime: &runtime,
        proxy: &proxy,
        probe: &probe,
        repository: &repository,
    };
    RunUseCase::new(ports).execute(&resolved.request, sink)
}
