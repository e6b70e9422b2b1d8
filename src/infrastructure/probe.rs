//! Operator-side HTTP probe backed by `reqwest`'s blocking client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::domain::ports::HttpProbe;

pub struct ReqwestProbe {
    timeout: Duration,
}

impl ReqwestProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl HttpProbe for ReqwestProbe {
    fn status(&self, url: &str) -> Result<u16, String> {
        // A redirect is itself a healthy answer; following it could leave the host.
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(self.timeout)
            .build()
            .map_err(|e| e.to_string())?;

        match client.get(url).send() {
            Ok(resp) => {
                debug!(url = url, status = %resp.status(), "probe answered");
                Ok(resp.status().as_u16())
            }
            Err(e) => {
                debug!(url = url, error = %e, "probe failed");
                Err(e.to_string())
            }
        }
    }
}
