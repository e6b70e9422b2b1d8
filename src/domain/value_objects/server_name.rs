//! Server name value object for the proxy route.
//!
//! The value ends up inside an nginx `server_name` directive, so only
//! characters that cannot terminate or extend a directive are accepted.

use std::fmt;
use std::str::FromStr;

use crate::error::HoistError;

/// nginx catch-all name, used when the operator supplies no domain.
pub const PLACEHOLDER_SERVER_NAME: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerName(String);

impl ServerName {
    pub fn parse(input: &str) -> Result<Self, HoistError> {
        let s = input.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(HoistError::input("domain", "domain is empty"));
        }
        if s == PLACEHOLDER_SERVER_NAME {
            return Ok(Self::placeholder());
        }

        // Allow one leading wildcard label (*.example.com).
        let body = s.strip_prefix("*.").unwrap_or(&s);
        let valid = !body.is_empty()
            && body.len() <= 253
            && body.split('.').all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            });

        if !valid {
            return Err(HoistError::input(
                "domain",
                format!("'{}' is not a valid server name", input.trim()),
            ));
        }
        Ok(Self(s))
    }

    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_SERVER_NAME.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_SERVER_NAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ServerName {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl FromStr for ServerName {
    type Err = HoistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
