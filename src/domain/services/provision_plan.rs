//! Capabilities a host needs before anything can be deployed to it.
//!
//! Pure data plus the shell text to probe for and install each one. The
//! provisioner decides what to run; this module only describes it.

use super::shell;

/// Group that grants access to the docker socket.
pub const DOCKER_GROUP: &str = "docker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Rsync,
    Curl,
    ContainerRuntime,
    Compose,
    ReverseProxy,
}

/// Install order. The runtime has to exist before the compose plugin.
pub const REQUIRED_CAPABILITIES: &[Capability] = &[
    Capability::Rsync,
    Capability::Curl,
    Capability::ContainerRuntime,
    Capability::Compose,
    Capability::ReverseProxy,
];

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Capability::Rsync => "rsync",
            Capability::Curl => "curl",
            Capability::ContainerRuntime => "docker",
            Capability::Compose => "docker compose",
            Capability::ReverseProxy => "nginx",
        }
    }

    /// Succeeds iff the capability is already usable.
    pub fn probe(self) -> String {
        match self {
            Capability::Rsync => shell::command_exists("rsync"),
            Capability::Curl => shell::command_exists("curl"),
            Capability::ContainerRuntime => shell::command_exists("docker"),
            Capability::Compose => format!(
                "docker compose version >/dev/null 2>&1 || {}",
                shell::command_exists("docker-compose")
            ),
            Capability::ReverseProxy => shell::command_exists("nginx"),
        }
    }

    /// Candidate packages; the first one that installs wins.
    pub fn packages(self) -> &'static [&'static str] {
        match self {
            Capability::Rsync => &["rsync"],
            Capability::Curl => &["curl"],
            Capability::ContainerRuntime => &["docker.io"],
            // Package naming differs between Docker's repo and distro repos.
            Capability::Compose => &["docker-compose-plugin", "docker-compose-v2", "docker-compose"],
            Capability::ReverseProxy => &["nginx"],
        }
    }

    /// systemd unit that must be enabled at boot and running.
    pub fn service(self) -> Option<&'static str> {
        match self {
            Capability::ContainerRuntime => Some("docker"),
            Capability::ReverseProxy => Some("nginx"),
            _ => None,
        }
    }

    pub fn install_command(self) -> String {
        self.packages()
            .iter()
            .map(|pkg| format!("{APT_INSTALL} {pkg}"))
            .collect::<Vec<_>>()
            .join(" || ")
    }
}

const APT_INSTALL: &str = "sudo DEBIAN_FRONTEND=noninteractive apt-get install -y -qq";

pub fn package_index_update() -> String {
    "sudo DEBIAN_FRONTEND=noninteractive apt-get update -qq".to_string()
}

pub fn enable_service(unit: &str) -> String {
    format!("sudo systemctl enable {}", shell::quote(unit))
}

pub fn start_service(unit: &str) -> String {
    format!("sudo systemctl start {}", shell::quote(unit))
}

/// Succeeds iff `user` is already in `group`.
pub fn in_group(user: &str, group: &str) -> String {
    format!("id -nG {} | tr ' ' '\\n' | grep -qx {}", shell::quote(user), shell::quote(group))
}

pub fn add_to_group(user: &str, group: &str) -> String {
    format!("sudo usermod -aG {} {}", shell::quote(group), shell::quote(user))
}
