use crate::error::{PkgInfoError, Result};
use crate::models::{Architecture, PackageId, PackageVersion};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "package.toml";

/// Deployment manifest describing an installed package, read from
/// `package.toml` in the package root. A package deployed without one is a
/// loose (development-mode) deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: PackageVersion,
    pub publisher: String,

    #[serde(default)]
    pub architecture: Option<Architecture>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Logo image path, relative to the package root.
    #[serde(default)]
    pub logo: Option<PathBuf>,

    #[serde(default)]
    pub development_mode: bool,

    /// Directories of dependency packages, relative to the package root.
    /// Each is expected to carry its own manifest.
    #[serde(default)]
    pub dependencies: Vec<PathBuf>,
}

impl PackageManifest {
    /// Load the manifest from a package root directory.
    ///
    /// Returns `Ok(None)` when no manifest file is present; a present but
    /// unparsable manifest is an error.
    pub fn find(package_root: &Path) -> Result<Option<Self>> {
        let manifest_path = package_root.join(MANIFEST_FILE_NAME);

        if !manifest_path.exists() {
            log::debug!("No manifest at {manifest_path:?}, treating as loose deployment");
            return Ok(None);
        }

        let contents = fs::read_to_string(&manifest_path)?;
        let manifest: PackageManifest = toml::from_str(&contents).map_err(|e| {
            PkgInfoError::InvalidManifest(format!(
                "Failed to parse {}: {e}",
                manifest_path.display()
            ))
        })?;

        log::debug!("Loaded manifest from {manifest_path:?}");
        Ok(Some(manifest))
    }

    pub fn identity(&self) -> PackageId {
        PackageId::new(
            self.name.clone(),
            self.version,
            self.publisher.clone(),
            self.architecture.unwrap_or_else(Architecture::current),
        )
    }
}
