//! Application port value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HoistError;

/// TCP port the application listens on, published 1:1 on the host.
///
/// Zero is rejected; the upper bound comes from `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u16")]
pub struct AppPort(u16);

impl AppPort {
    pub fn new(port: u32) -> Result<Self, HoistError> {
        match u16::try_from(port) {
            Ok(0) => Err(HoistError::input("port", "0 is outside 1-65535")),
            Ok(p) => Ok(Self(p)),
            Err(_) => Err(HoistError::input(
                "port",
                format!("{port} is outside 1-65535"),
            )),
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl FromStr for AppPort {
    type Err = HoistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u32 = trimmed
            .parse()
            .map_err(|_| HoistError::input("port", format!("'{trimmed}' is not a number")))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for AppPort {
    type Error = HoistError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppPort> for u16 {
    fn from(value: AppPort) -> Self {
        value.0
    }
}

impl fmt::Display for AppPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
