//! Deploy Options

use std::time::Duration;

pub const DEFAULT_STARTUP_DELAY_SECS: u64 = 5;
pub const DEFAULT_LOG_TAIL_LINES: usize = 30;

/// Options for the deploy use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Wait between starting the workload and probing it
    pub startup_delay: Duration,
    /// Log lines attached to the health warning when the app is silent
    pub log_tail_lines: usize,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_secs(DEFAULT_STARTUP_DELAY_SECS),
            log_tail_lines: DEFAULT_LOG_TAIL_LINES,
        }
    }
}

impl DeployOptions {
    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }

    pub fn with_log_tail_lines(mut self, lines: usize) -> Self {
        self.log_tail_lines = lines;
        self
    }
}
