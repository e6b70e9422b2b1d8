//! Application descriptor - how the synchronized tree is built and run.

use std::path::{Path, PathBuf};

/// Compose file names, highest priority first.
pub const COMPOSE_FILE_NAMES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Single-container build descriptor.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Closed classification of the working tree. Exactly one variant applies;
/// a tree with neither descriptor never reaches the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationDescriptor {
    /// A `Dockerfile` at the root, built and run as one container.
    SingleContainer {
        /// Local directory holding the Dockerfile
        build_context: PathBuf,
        /// Image tag and container name
        image: String,
    },
    /// A compose file at the root, brought up as a stack.
    ComposeStack {
        /// Local path of the compose file
        compose_file: PathBuf,
        /// Service names declared in the file
        services: Vec<String>,
    },
}

impl ApplicationDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            ApplicationDescriptor::SingleContainer { .. } => "dockerfile",
            ApplicationDescriptor::ComposeStack { .. } => "compose",
        }
    }

    /// Compose file name relative to the tree root, for remote use.
    pub fn compose_file_name(&self) -> Option<&str> {
        match self {
            ApplicationDescriptor::ComposeStack { compose_file, .. } => {
                compose_file.file_name().and_then(|n| n.to_str())
            }
            ApplicationDescriptor::SingleContainer { .. } => None,
        }
    }

    pub fn descriptor_path(&self) -> PathBuf {
        match self {
            ApplicationDescriptor::SingleContainer { build_context, .. } => {
                build_context.join(DOCKERFILE_NAME)
            }
            ApplicationDescriptor::ComposeStack { compose_file, .. } => compose_file.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        match self {
            ApplicationDescriptor::SingleContainer { build_context, .. } => build_context,
            ApplicationDescriptor::ComposeStack { compose_file, .. } => {
                compose_file.parent().unwrap_or_else(|| Path::new("."))
            }
        }
    }
}
