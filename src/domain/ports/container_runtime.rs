//! Container runtime port - typed view of the remote container engine.

use crate::domain::entities::{ContainerRef, ContainerSummary};
use crate::domain::value_objects::AppPort;
use crate::error::HoistResult;

/// Container operations the deployment driver, health validator and
/// cleanup coordinator need. All calls act on the remote host.
pub trait ContainerRuntime {
    /// Containers holding a binding of host port `port`.
    fn containers_publishing(&self, port: AppPort) -> HoistResult<Vec<ContainerRef>>;

    /// Container with exactly this name, if any.
    fn container_named(&self, name: &str) -> HoistResult<Option<ContainerRef>>;

    /// Stop then remove. An empty slice is a no-op.
    fn remove_containers(&self, containers: &[ContainerRef]) -> HoistResult<()>;

    /// Every container on the host, running or stopped.
    fn all_containers(&self) -> HoistResult<Vec<ContainerRef>>;

    fn prune_networks(&self) -> HoistResult<()>;

    fn prune_images(&self) -> HoistResult<()>;

    /// Pull, build and start a compose stack detached, from `app_dir`.
    fn compose_up(&self, app_dir: &str, compose_file: &str) -> HoistResult<()>;

    /// Build `image` from `app_dir`.
    fn build_image(&self, app_dir: &str, image: &str) -> HoistResult<()>;

    /// Start `image` detached as `name`, publishing `port` 1:1.
    fn run_container(&self, image: &str, name: &str, port: AppPort) -> HoistResult<()>;

    /// Running containers, newest first.
    fn list_running(&self) -> HoistResult<Vec<ContainerSummary>>;

    /// Last `lines` log lines of a container.
    fn logs_tail(&self, container: &ContainerRef, lines: usize) -> HoistResult<String>;
}

impl<T: ContainerRuntime + ?Sized> ContainerRuntime for &T {
    fn containers_publishing(&self, port: AppPort) -> HoistResult<Vec<ContainerRef>> {
        (**self).containers_publishing(port)
    }

    fn container_named(&self, name: &str) -> HoistResult<Option<ContainerRef>> {
        (**self).container_named(name)
    }

    fn remove_containers(&self, containers: &[ContainerRef]) -> HoistResult<()> {
        (**self).remove_containers(containers)
    }

    fn all_containers(&self) -> HoistResult<Vec<ContainerRef>> {
        (**self).all_containers()
    }

    fn prune_networks(&self) -> HoistResult<()> {
        (**self).prune_networks()
    }

    fn prune_images(&self) -> HoistResult<()> {
        (**self).prune_images()
    }

    fn compose_up(&self, app_dir: &str, compose_file: &str) -> HoistResult<()> {
        (**self).compose_up(app_dir, compose_file)
    }

    fn build_image(&self, app_dir: &str, image: &str) -> HoistResult<()> {
        (**self).build_image(app_dir, image)
    }

    fn run_container(&self, image: &str, name: &str, port: AppPort) -> HoistResult<()> {
        (**self).run_container(image, name, port)
    }

    fn list_running(&self) -> HoistResult<Vec<ContainerSummary>> {
        (**self).list_running()
    }

    fn logs_tail(&self, container: &ContainerRef, lines: usize) -> HoistResult<String> {
        (**self).logs_tail(container, lines)
    }
}
