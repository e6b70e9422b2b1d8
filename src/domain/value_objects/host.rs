//! Host address value object.
//!
//! Accepts dotted-decimal IPv4 literals and multi-label DNS names. Anything
//! that looks numeric must be a valid IPv4 address; single-label names are
//! rejected so a mistyped address never reaches SSH.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HoistError;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A validated remote host address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HostAddress {
    Ipv4(Ipv4Addr),
    Hostname(String),
}

impl HostAddress {
    pub fn parse(input: &str) -> Result<Self, HoistError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(HoistError::input("host", "host address is empty"));
        }

        if s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Ipv4Addr::from_str(s)
                .map(HostAddress::Ipv4)
                .map_err(|_| HoistError::input("host", format!("'{s}' is not a valid IPv4 address")));
        }

        validate_hostname(s)?;
        Ok(HostAddress::Hostname(s.to_ascii_lowercase()))
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, HostAddress::Ipv4(_))
    }
}

fn validate_hostname(s: &str) -> Result<(), HoistError> {
    let bad = |why: &str| HoistError::input("host", format!("'{s}' {why}"));

    if s.len() > MAX_HOSTNAME_LEN {
        return Err(bad("is longer than 253 characters"));
    }

    let labels: Vec<&str> = s.split('.').collect();
    if labels.len() < 2 {
        return Err(bad("is neither an IPv4 address nor a fully qualified hostname"));
    }

    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(bad("has an empty or oversized label"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(bad("contains characters not allowed in a hostname"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(bad("has a label starting or ending with '-'"));
        }
    }

    let tld = labels[labels.len() - 1];
    if !tld.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(bad("has a numeric top-level label"));
    }
    // "10.0.0.a1" is a mistyped address, not a name.
    let numeric = |label: &&str| label.chars().all(|c| c.is_ascii_digit());
    if labels.len() == 4 && labels[..3].iter().all(numeric) {
        return Err(bad("looks like a mistyped IPv4 address"));
    }

    Ok(())
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAddress::Ipv4(ip) => write!(f, "{ip}"),
            HostAddress::Hostname(name) => f.write_str(name),
        }
    }
}

impl FromStr for HostAddress {
    type Err = HoistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HostAddress {
    type Error = HoistError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HostAddress> for String {
    fn from(value: HostAddress) -> Self {
        value.to_string()
    }
}
