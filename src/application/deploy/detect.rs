//! Application descriptor detection
//!
//! Runs entirely on the local tree, so a tree that cannot be deployed is
//! rejected before the host is contacted.

use std::path::Path;

use serde::Deserialize;
use serde_yaml_ng::Mapping;
use tracing::debug;

use crate::domain::entities::{ApplicationDescriptor, COMPOSE_FILE_NAMES, DOCKERFILE_NAME};
use crate::error::{HoistError, HoistResult};

/// Only the part of a compose document the deploy depends on.
#[derive(Debug, Deserialize)]
struct ComposeDocument {
    #[serde(default)]
    services: Option<Mapping>,
}

/// Classify the tree at `root`. Compose files win over a Dockerfile, and
/// only the root directory is looked at.
pub fn detect_descriptor(root: &Path, image: &str) -> HoistResult<ApplicationDescriptor> {
    for name in COMPOSE_FILE_NAMES {
        let path = root.join(name);
        if path.is_file() {
            debug!("found compose file {}", path.display());
            let services = compose_services(&path)?;
            return Ok(ApplicationDescriptor::ComposeStack {
                compose_file: path,
                services,
            });
        }
    }

    if root.join(DOCKERFILE_NAME).is_file() {
        debug!("found {} in {}", DOCKERFILE_NAME, root.display());
        return Ok(ApplicationDescriptor::SingleContainer {
            build_context: root.to_path_buf(),
            image: image.to_string(),
        });
    }

    Err(HoistError::NoApplicationDescriptor {
        path: root.to_path_buf(),
    })
}

fn compose_services(path: &Path) -> HoistResult<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let invalid = |message: String| HoistError::InvalidComposeFile {
        path: path.to_path_buf(),
        message,
    };

    let doc: ComposeDocument =
        serde_yaml_ng::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    let services = doc
        .services
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("no services defined".to_string()))?;

    Ok(services
        .keys()
        .map(|k| k.as_str().map_or_else(|| format!("{k:?}"), str::to_string))
        .collect())
}
