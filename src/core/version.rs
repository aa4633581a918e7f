//! Release versions.
//!
//! A tracked version is always `MAJOR.0`: `147`, `147.0` and `147.0.1` all
//! canonicalize to `147.0`. Ordering is numeric, so `9.0 < 10.0`.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StatsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    major: u32,
}

impl Version {
    pub fn new(major: u32) -> Self {
        Self { major }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    /// Parse and canonicalize a user supplied version.
    pub fn parse(input: &str) -> Result<Self, StatsError> {
        let trimmed = input.trim();
        let mut parts = trimmed.split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| invalid_version(input))?;

        // Minor and patch must be numeric but are not tracked.
        for part in parts {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid_version(input));
            }
        }

        Ok(Self { major })
    }
}

fn invalid_version(input: &str) -> StatsError {
    StatsError::config(format!(
        "invalid version '{}': expected MAJOR or MAJOR.MINOR (e.g. 147.0)",
        input
    ))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.0", self.major)
    }
}

impl FromStr for Version {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major.cmp(&other.major)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(serde::de::Error::custom)
    }
}
