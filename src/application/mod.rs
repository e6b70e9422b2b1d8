//! Application Layer
//!
//! Use cases that orchestrate a run. Each stage is one use case, driven
//! through domain ports so it can run against a real host or the
//! in-memory one in `testing`.
//!
//! ## Use Cases
//!
//! - `ProvisionUseCase` - install, enable and start what the host needs
//! - `DeployUseCase` - replace the previous workload with the new tree
//! - `ProxyUseCase` - reconcile the nginx site and reload
//! - `HealthUseCase` - verify the result from inside and outside the host
//! - `CleanUseCase` - tear down what deploys created
//! - `RunUseCase` - sequence the above through a `Pipeline`

pub mod clean;
pub mod deploy;
pub mod health;
pub mod pipeline;
pub mod provision;
pub mod proxy;
pub mod run;

#[cfg(test)]
pub(crate) mod testing;

pub use clean::{CleanReport, CleanUseCase};
pub use deploy::{detect_descriptor, DeployOptions, DeployReport, DeployUseCase};
pub use health::{HealthReport, HealthUseCase};
pub use pipeline::{Pipeline, RunReport, StageOutcome, StageReport, StageReporter};
pub use provision::{ProvisionReport, ProvisionUseCase};
pub use proxy::{ProxyReport, ProxyUseCase};
pub use run::{RunPorts, RunRequest, RunUseCase, SourceTree};
