use crate::error::{PkgInfoError, Result};
use crate::models::PackageVersion;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Alphabet used for publisher-id digests (base32, Crockford variant).
const PUBLISHER_ID_ALPHABET: &[u8] = b"0123456789abcdefghjkmnpqrstvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    X86,
    Aarch64,
    Arm32,
    Neutral,
}

impl Architecture {
    /// Detect the architecture of the running process from the build target.
    pub fn current() -> Self {
        #[cfg(target_arch = "x86_64")]
        return Architecture::X64;

        #[cfg(target_arch = "x86")]
        return Architecture::X86;

        #[cfg(target_arch = "aarch64")]
        return Architecture::Aarch64;

        #[cfg(target_arch = "arm")]
        return Architecture::Arm32;

        #[cfg(not(any(
            target_arch = "x86_64",
            target_arch = "x86",
            target_arch = "aarch64",
            target_arch = "arm"
        )))]
        return Architecture::Neutral;
    }
}

impl FromStr for Architecture {
    type Err = PkgInfoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" => Ok(Architecture::X64),
            "x86" | "i386" | "i686" => Ok(Architecture::X86),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            "arm32" | "arm" => Ok(Architecture::Arm32),
            "neutral" | "any" => Ok(Architecture::Neutral),
            _ => Err(PkgInfoError::InvalidManifest(format!(
                "Unknown architecture: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arch = match self {
            Architecture::X64 => "x64",
            Architecture::X86 => "x86",
            Architecture::Aarch64 => "aarch64",
            Architecture::Arm32 => "arm32",
            Architecture::Neutral => "neutral",
        };
        write!(f, "{arch}")
    }
}

/// Identity of an application package: name, version, publisher, and
/// architecture, plus the names derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageId {
    pub name: String,
    pub version: PackageVersion,
    pub publisher: String,
    pub architecture: Architecture,
}

impl PackageId {
    pub fn new(
        name: String,
        version: PackageVersion,
        publisher: String,
        architecture: Architecture,
    ) -> Self {
        Self {
            name,
            version,
            publisher,
            architecture,
        }
    }

    /// Digest of the publisher string: the first 8 bytes of the SHA-256 of
    /// its UTF-16LE encoding, rendered as 13 base32 digits.
    pub fn publisher_id(&self) -> String {
        let mut utf16le = Vec::with_capacity(self.publisher.len() * 2);
        for unit in self.publisher.encode_utf16() {
            utf16le.extend_from_slice(&unit.to_le_bytes());
        }

        let hash = Sha256::digest(&utf16le);
        let prefix = hash[..8]
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));

        // 64 bits plus a trailing zero pad bit, consumed 5 bits at a time.
        let bits = prefix << 1;
        let mut id = String::with_capacity(13);
        for index in 0..13 {
            let digit = (bits >> (5 * (12 - index))) & 0x1f;
            id.push(PUBLISHER_ID_ALPHABET[digit as usize] as char);
        }
        id
    }

    /// Package family name: stable across versions and architectures.
    pub fn family_name(&self) -> String {
        format!("{}_{}", self.name, self.publisher_id())
    }

    /// Fully qualified package name, unique per version and architecture.
    pub fn full_name(&self) -> String {
        format!(
            "{}_{}_{}__{}",
            self.name,
            self.version,
            self.architecture,
            self.publisher_id()
        )
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
