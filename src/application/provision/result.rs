//! Provision Result

/// What provisioning changed on the host, per capability name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Capabilities that were already usable
    pub present: Vec<&'static str>,
    pub installed: Vec<&'static str>,
    /// Units enabled at boot by this run
    pub enabled: Vec<&'static str>,
    /// Units started by this run
    pub started: Vec<&'static str>,
    /// Whether the user was added to the docker group
    pub group_added: bool,
}

impl ProvisionReport {
    /// True when the host needed nothing.
    pub fn is_noop(&self) -> bool {
        self.installed.is_empty()
            && self.enabled.is_empty()
            && self.started.is_empty()
            && !self.group_added
    }
}
