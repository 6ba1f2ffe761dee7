use crate::error::{PkgInfoError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Four-part package version in the platform's shape (major.minor.build.revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl PackageVersion {
    pub fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl FromStr for PackageVersion {
    type Err = PkgInfoError;

    fn from_str(s: &str) -> Result<Self> {
        let components: Vec<&str> = s.split('.').collect();

        if components.is_empty() || components.len() > 4 {
            return Err(PkgInfoError::InvalidVersion(s.to_string()));
        }

        let mut parts = [0u16; 4];
        for (slot, component) in parts.iter_mut().zip(&components) {
            *slot = component
                .parse::<u16>()
                .map_err(|_| PkgInfoError::InvalidVersion(s.to_string()))?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl std::fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = PkgInfoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PackageVersion> for String {
    fn from(version: PackageVersion) -> Self {
        version.to_string()
    }
}
