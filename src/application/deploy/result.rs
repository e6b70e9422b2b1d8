//! Deploy Result

use crate::domain::entities::{ContainerRef, ContainerSummary};

/// Result of a deploy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// `compose` or `dockerfile`
    pub descriptor_kind: &'static str,
    /// Containers removed by the pre-deploy pass
    pub replaced: Vec<ContainerRef>,
    /// Running containers right after start-up
    pub running: Vec<ContainerSummary>,
    /// What the app port answered on loopback, if anything
    pub loopback_status: Option<u16>,
}

impl DeployReport {
    pub fn app_answered(&self) -> bool {
        self.loopback_status.is_some_and(|code| code < 500)
    }
}
