//! In-memory host and other doubles for use case tests.
//!
//! `FakeHost` keeps the remote state a real Ubuntu host would have (packages,
//! units, containers, nginx sites) and answers the exact command strings the
//! use cases build, so a test can run a whole deploy and inspect the result.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::domain::entities::{ContainerRef, ContainerSummary};
use crate::domain::ports::{
    ContainerRuntime, ExecError, HttpProbe, ProxyServer, RemoteCommandResult, RemoteExecutor,
    RepositorySync, StageEvent, StageEventSink,
};
use crate::domain::services::provision_plan::{
    add_to_group, enable_service, in_group, package_index_update, start_service,
};
use crate::domain::services::{shell, Capability, DOCKER_GROUP, REQUIRED_CAPABILITIES};
use crate::domain::value_objects::{
    AppPort, RemoteLayout, RepositoryDescriptor, SshUser, TRANSFER_EXCLUDES,
};
use crate::error::{HoistError, HoistResult};

pub const USER: &str = "deploy";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeContainer {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Host port it binds
    pub port: Option<u16>,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unit {
    pub enabled: bool,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct HostState {
    pub capabilities: BTreeSet<&'static str>,
    pub units: BTreeMap<&'static str, Unit>,
    pub groups: BTreeSet<String>,
    pub containers: Vec<FakeContainer>,
    pub images: BTreeSet<String>,
    /// Files in the synced app tree, relative to the app dir
    pub app_tree: Option<BTreeSet<String>>,
    /// Regular files outside the app tree (nginx sites, uploads)
    pub files: BTreeMap<String, String>,
    /// Symlinks: link path -> target
    pub links: BTreeMap<String, String>,
    /// Site content nginx is currently serving, set on reload
    pub served_site: Option<String>,
    /// Mutating actions, in order
    pub actions: Vec<String>,
    pub apt_updates: usize,
    pub reloads: usize,
    pub network_prunes: usize,
    next_id: usize,
}

impl HostState {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("c{:04}", self.next_id)
    }

    fn port_holder(&self, port: u16) -> Option<&FakeContainer> {
        self.containers
            .iter()
            .find(|c| c.running && c.port == Some(port))
    }
}

/// Simulated remote host.
pub struct FakeHost {
    pub layout: RemoteLayout,
    pub state: RefCell<HostState>,
    /// `nginx -t` diagnostic to return instead of passing
    pub nginx_rejects: RefCell<Option<String>>,
    /// Services a compose stack starts: (service, published port)
    pub compose_services: RefCell<Vec<(String, u16)>>,
    /// Whether started containers answer HTTP
    pub app_answers: Cell<bool>,
    /// Fail every call as if the network were gone
    pub unreachable: Cell<bool>,
    /// Every script received, in order
    pub commands: RefCell<Vec<String>>,
}

impl FakeHost {
    /// A freshly installed host with none of the required capabilities.
    pub fn fresh() -> Self {
        Self {
            layout: RemoteLayout::for_user(&user()),
            state: RefCell::new(HostState::default()),
            nginx_rejects: RefCell::new(None),
            compose_services: RefCell::new(vec![("web".to_string(), 8080)]),
            app_answers: Cell::new(true),
            unreachable: Cell::new(false),
            commands: RefCell::new(Vec::new()),
        }
    }

    /// A host where everything is installed, enabled and running.
    pub fn provisioned() -> Self {
        let host = Self::fresh();
        {
            let mut st = host.state.borrow_mut();
            for &cap in REQUIRED_CAPABILITIES {
                install(&mut st, cap);
            }
            st.groups.insert(DOCKER_GROUP.to_string());
            st.actions.clear();
        }
        host
    }

    pub fn with_container(self, name: &str, image: &str, port: u16) -> Self {
        {
            let mut st = self.state.borrow_mut();
            let id = st.next_id();
            st.containers.push(FakeContainer {
                id,
                name: name.to_string(),
                image: image.to_string(),
                port: Some(port),
                running: true,
            });
            st.images.insert(image.to_string());
        }
        self
    }

    pub fn running_names(&self) -> Vec<String> {
        self.state
            .borrow()
            .containers
            .iter()
            .filter(|c| c.running)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.borrow().actions.clone()
    }

    pub fn link(&self, path: &str) -> Option<String> {
        self.state.borrow().links.get(path).cloned()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.state.borrow().files.get(path).cloned()
    }

    fn guard(&self) -> HoistResult<()> {
        if self.unreachable.get() {
            return Err(HoistError::Connectivity {
                host: self.destination().to_string(),
                message: "Connection timed out".to_string(),
            });
        }
        Ok(())
    }

    fn fail(step: &str, output: impl Into<String>) -> HoistError {
        HoistError::RemoteCommand {
            step: step.to_string(),
            status: 1,
            output: output.into(),
        }
    }

    fn loopback_answer(&self, st: &HostState, port: u16) -> &'static str {
        if port == 80 {
            let nginx_up = st.units.get("nginx").is_some_and(|u| u.active);
            if !nginx_up {
                return "000";
            }
            let Some(site) = &st.served_site else {
                return "404";
            };
            let upstream = site
                .lines()
                .find_map(|l| l.trim().strip_prefix("proxy_pass http://127.0.0.1:"))
                .and_then(|rest| rest.trim_end_matches(';').parse::<u16>().ok());
            return match upstream {
                Some(p) if st.port_holder(p).is_some() && self.app_answers.get() => "200",
                _ => "502",
            };
        }
        if st.port_holder(port).is_some() && self.app_answers.get() {
            "200"
        } else {
            "000"
        }
    }

    fn interpret(&self, script: &str) -> RemoteCommandResult {
        let mut st = self.state.borrow_mut();
        let user = USER;

        for &cap in REQUIRED_CAPABILITIES {
            if script == cap.probe() {
                return status(st.capabilities.contains(cap.name()));
            }
            if script == cap.install_command() {
                install(&mut st, cap);
                return RemoteCommandResult::ok("");
            }
        }
        if script == package_index_update() {
            st.apt_updates += 1;
            st.actions.push("apt-get update".to_string());
            return RemoteCommandResult::ok("");
        }
        for unit in ["docker", "nginx"] {
            if script == shell::service_enabled(unit) {
                return status(st.units.get(unit).is_some_and(|u| u.enabled));
            }
            if script == shell::service_active(unit) {
                return status(st.units.get(unit).is_some_and(|u| u.active));
            }
            if script == enable_service(unit) {
                st.units.entry(unit).or_default().enabled = true;
                st.actions.push(format!("enable {unit}"));
                return RemoteCommandResult::ok("");
            }
            if script == start_service(unit) {
                st.units.entry(unit).or_default().active = true;
                st.actions.push(format!("start {unit}"));
                return RemoteCommandResult::ok("");
            }
        }
        if script == in_group(user, DOCKER_GROUP) {
            return status(st.groups.contains(DOCKER_GROUP));
        }
        if script == add_to_group(user, DOCKER_GROUP) {
            st.groups.insert(DOCKER_GROUP.to_string());
            st.actions.push("usermod docker".to_string());
            return RemoteCommandResult::ok("");
        }
        if script == shell::make_dir(self.layout.app_dir()) {
            st.app_tree.get_or_insert_with(BTreeSet::new);
            return RemoteCommandResult::ok("");
        }
        if script == shell::remove_tree(self.layout.app_dir()) {
            st.app_tree = None;
            st.actions.push("rm app dir".to_string());
            return RemoteCommandResult::ok("");
        }
        if let Some(port) = loopback_port(script) {
            return RemoteCommandResult::ok(self.loopback_answer(&st, port));
        }
        RemoteCommandResult::failed(127, format!("fake host: unknown command: {script}"))
    }
}

fn user() -> SshUser {
    SshUser::parse(USER).unwrap()
}

fn status(ok: bool) -> RemoteCommandResult {
    if ok {
        RemoteCommandResult::ok("")
    } else {
        RemoteCommandResult::failed(1, "")
    }
}

fn install(st: &mut HostState, cap: Capability) {
    st.capabilities.insert(cap.name());
    st.actions.push(format!("install {}", cap.name()));
    // Debian packages enable and start their units on install.
    if let Some(unit) = cap.service() {
        st.units.insert(
            unit,
            Unit {
                enabled: true,
                active: true,
            },
        );
    }
    if cap == Capability::ReverseProxy {
        st.files.insert(
            "/etc/nginx/sites-available/default".to_string(),
            "server { listen 80 default_server; }".to_string(),
        );
        st.links.insert(
            "/etc/nginx/sites-enabled/default".to_string(),
            "/etc/nginx/sites-available/default".to_string(),
        );
    }
}

fn loopback_port(script: &str) -> Option<u16> {
    let rest = script.split("http://127.0.0.1:").nth(1)?;
    let port: u16 = rest.split('/').next()?.parse().ok()?;
    (script == shell::loopback_http_status(port)).then_some(port)
}

fn relative_files(root: &Path, dir: &Path, out: &mut BTreeSet<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let excluded = TRANSFER_EXCLUDES.iter().any(|pat| match pat.strip_suffix('*') {
            Some(prefix) => name.starts_with(prefix),
            None => name == *pat,
        });
        if excluded {
            continue;
        }
        if path.is_dir() {
            relative_files(root, &path, out);
        } else if let Ok(rel) = path.strip_prefix(root) {
            out.insert(rel.to_string_lossy().to_string());
        }
    }
}

impl RemoteExecutor for FakeHost {
    fn destination(&self) -> &str {
        "deploy@192.0.2.10"
    }

    fn execute(&self, script: &str) -> Result<RemoteCommandResult, ExecError> {
        if self.unreachable.get() {
            return Err(ExecError::Connectivity("Connection timed out".to_string()));
        }
        self.commands.borrow_mut().push(script.to_string());
        Ok(self.interpret(script))
    }

    fn upload(&self, local: &Path, remote_path: &str) -> Result<RemoteCommandResult, ExecError> {
        if self.unreachable.get() {
            return Err(ExecError::Connectivity("Connection timed out".to_string()));
        }
        let content = std::fs::read_to_string(local).map_err(ExecError::Spawn)?;
        self.state
            .borrow_mut()
            .files
            .insert(remote_path.to_string(), content);
        Ok(RemoteCommandResult::ok(""))
    }

    fn sync_tree(
        &self,
        local_dir: &Path,
        remote_dir: &str,
        excludes: &[&str],
    ) -> Result<RemoteCommandResult, ExecError> {
        if self.unreachable.get() {
            return Err(ExecError::Connectivity("Connection timed out".to_string()));
        }
        self.commands
            .borrow_mut()
            .push(format!("rsync {} {remote_dir}", local_dir.display()));
        if remote_dir != self.layout.app_dir() || excludes != TRANSFER_EXCLUDES {
            return Ok(RemoteCommandResult::failed(23, "unexpected transfer"));
        }
        let mut files = BTreeSet::new();
        relative_files(local_dir, local_dir, &mut files);
        let mut st = self.state.borrow_mut();
        st.app_tree = Some(files);
        st.actions.push("transfer".to_string());
        Ok(RemoteCommandResult::ok(""))
    }
}

impl ContainerRuntime for FakeHost {
    fn containers_publishing(&self, port: AppPort) -> HoistResult<Vec<ContainerRef>> {
        self.guard()?;
        Ok(self
            .state
            .borrow()
            .containers
            .iter()
            .filter(|c| c.port == Some(port.get()))
            .map(|c| ContainerRef {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    fn container_named(&self, name: &str) -> HoistResult<Option<ContainerRef>> {
        self.guard()?;
        Ok(self
            .state
            .borrow()
            .containers
            .iter()
            .find(|c| c.name == name)
            .map(|c| ContainerRef {
                id: c.id.clone(),
                name: c.name.clone(),
            }))
    }

    fn remove_containers(&self, containers: &[ContainerRef]) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        for target in containers {
            let before = st.containers.len();
            st.containers.retain(|c| c.id != target.id);
            if st.containers.len() == before {
                return Err(Self::fail(
                    "docker rm",
                    format!("Error: No such container: {}", target.id),
                ));
            }
            st.actions.push(format!("remove {}", target.id));
        }
        Ok(())
    }

    fn all_containers(&self) -> HoistResult<Vec<ContainerRef>> {
        self.guard()?;
        Ok(self
            .state
            .borrow()
            .containers
            .iter()
            .map(|c| ContainerRef {
                id: c.id.clone(),
                name: String::new(),
            })
            .collect())
    }

    fn prune_networks(&self) -> HoistResult<()> {
        self.guard()?;
        self.state.borrow_mut().network_prunes += 1;
        Ok(())
    }

    fn prune_images(&self) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        let used: BTreeSet<String> = st.containers.iter().map(|c| c.image.clone()).collect();
        st.images.retain(|i| used.contains(i));
        st.actions.push("prune images".to_string());
        Ok(())
    }

    fn compose_up(&self, app_dir: &str, compose_file: &str) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        let has_file = app_dir == self.layout.app_dir()
            && st
                .app_tree
                .as_ref()
                .is_some_and(|t| t.contains(compose_file));
        if !has_file {
            return Err(Self::fail(
                "docker compose up",
                format!("open {app_dir}/{compose_file}: no such file or directory"),
            ));
        }
        let project = self.layout.workload_name();
        for (service, port) in self.compose_services.borrow().iter() {
            let name = format!("{project}-{service}-1");
            // Compose recreates its own containers in place.
            st.containers.retain(|c| c.name != name);
            if let Some(holder) = st.port_holder(*port) {
                return Err(Self::fail(
                    "docker compose up",
                    format!(
                        "Bind for 0.0.0.0:{port} failed: port is already allocated ({})",
                        holder.name
                    ),
                ));
            }
            let id = st.next_id();
            let image = format!("{project}-{service}");
            st.images.insert(image.clone());
            st.containers.push(FakeContainer {
                id,
                name: name.clone(),
                image,
                port: Some(*port),
                running: true,
            });
            st.actions.push(format!("compose start {name}"));
        }
        Ok(())
    }

    fn build_image(&self, app_dir: &str, image: &str) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        let has_dockerfile = app_dir == self.layout.app_dir()
            && st
                .app_tree
                .as_ref()
                .is_some_and(|t| t.contains("Dockerfile"));
        if !has_dockerfile {
            return Err(Self::fail("docker build", "failed to read dockerfile"));
        }
        st.images.insert(image.to_string());
        st.actions.push(format!("build {image}"));
        Ok(())
    }

    fn run_container(&self, image: &str, name: &str, port: AppPort) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        if !st.images.contains(image) {
            return Err(Self::fail("docker run", format!("Unable to find image '{image}'")));
        }
        if st.containers.iter().any(|c| c.name == name) {
            return Err(Self::fail(
                "docker run",
                format!("Conflict. The container name \"/{name}\" is already in use"),
            ));
        }
        if st.port_holder(port.get()).is_some() {
            return Err(Self::fail(
                "docker run",
                format!("Bind for 0.0.0.0:{port} failed: port is already allocated"),
            ));
        }
        let id = st.next_id();
        st.containers.push(FakeContainer {
            id,
            name: name.to_string(),
            image: image.to_string(),
            port: Some(port.get()),
            running: true,
        });
        st.actions.push(format!("run {name}"));
        Ok(())
    }

    fn list_running(&self) -> HoistResult<Vec<ContainerSummary>> {
        self.guard()?;
        Ok(self
            .state
            .borrow()
            .containers
            .iter()
            .rev()
            .filter(|c| c.running)
            .map(|c| ContainerSummary {
                id: c.id.clone(),
                name: c.name.clone(),
                image: c.image.clone(),
                status: "Up 5 seconds".to_string(),
                ports: c
                    .port
                    .map(|p| format!("0.0.0.0:{p}->{p}/tcp"))
                    .unwrap_or_default(),
            })
            .collect())
    }

    fn logs_tail(&self, container: &ContainerRef, lines: usize) -> HoistResult<String> {
        self.guard()?;
        Ok(format!("[{}] last {lines} lines: bind: address already in use", container.name))
    }
}

impl ProxyServer for FakeHost {
    fn install_site(&self, content: &str) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        st.files.insert(self.layout.site_available(), content.to_string());
        st.actions.push("install site".to_string());
        Ok(())
    }

    fn remove_default_site(&self) -> HoistResult<()> {
        self.guard()?;
        self.state
            .borrow_mut()
            .links
            .remove(&self.layout.default_site_enabled());
        Ok(())
    }

    fn relink_site(&self) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        st.links.remove(&self.layout.site_enabled());
        st.links
            .insert(self.layout.site_enabled(), self.layout.site_available());
        Ok(())
    }

    fn validate(&self) -> HoistResult<Result<(), String>> {
        self.guard()?;
        if let Some(diag) = self.nginx_rejects.borrow().clone() {
            return Ok(Err(diag));
        }
        let st = self.state.borrow();
        for (link, target) in &st.links {
            if !st.files.contains_key(target) {
                return Ok(Err(format!(
                    "nginx: [emerg] open() \"{link}\" failed (2: No such file or directory)"
                )));
            }
        }
        Ok(Ok(()))
    }

    fn reload(&self) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        if !st.units.get("nginx").is_some_and(|u| u.active) {
            return Err(Self::fail("reload nginx", "nginx.service is not active"));
        }
        let served = st
            .links
            .get(&self.layout.site_enabled())
            .and_then(|target| st.files.get(target))
            .cloned();
        st.served_site = served;
        st.reloads += 1;
        st.actions.push("reload nginx".to_string());
        Ok(())
    }

    fn remove_site(&self) -> HoistResult<()> {
        self.guard()?;
        let mut st = self.state.borrow_mut();
        st.links.remove(&self.layout.site_enabled());
        st.files.remove(&self.layout.site_available());
        st.actions.push("remove site".to_string());
        Ok(())
    }
}

/// Operator-side probe with a fixed answer.
pub struct FakeProbe(pub Result<u16, String>);

impl HttpProbe for FakeProbe {
    fn status(&self, _url: &str) -> Result<u16, String> {
        self.0.clone()
    }
}

/// Repository sync that hands back a prepared directory.
pub struct FakeRepository {
    pub tree: PathBuf,
    pub calls: Cell<usize>,
}

impl FakeRepository {
    pub fn new(tree: impl Into<PathBuf>) -> Self {
        Self {
            tree: tree.into(),
            calls: Cell::new(0),
        }
    }
}

impl RepositorySync for FakeRepository {
    fn sync(&self, _repo: &RepositoryDescriptor, _token: Option<&str>) -> HoistResult<PathBuf> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.tree.clone())
    }
}

/// Collects every event for assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<StageEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<StageEvent> {
        self.events.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                StageEvent::Warning { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl StageEventSink for RecordingSink {
    fn on_event(&self, event: StageEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Write a working tree with the given files.
pub fn tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }
    dir
}
