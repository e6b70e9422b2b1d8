//! SSH login name value object.

use std::fmt;
use std::str::FromStr;

use crate::error::HoistError;

/// A POSIX-portable login name.
///
/// The name is interpolated into remote paths (`/home/<user>/app`) and
/// `usermod` calls, so anything outside `[a-z_][a-z0-9_-]*` is refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SshUser(String);

impl SshUser {
    pub fn parse(input: &str) -> Result<Self, HoistError> {
        let s = input.trim();
        let mut chars = s.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
        let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if !first_ok || !rest_ok || s.len() > 32 {
            return Err(HoistError::input(
                "user",
                format!("'{s}' is not a valid login name"),
            ));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SshUser {
    type Err = HoistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SshUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
