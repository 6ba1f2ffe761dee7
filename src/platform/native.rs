use crate::error::{PkgInfoError, Result};
use crate::manifest::PackageManifest;
use crate::models::{Architecture, PackageId, PackageVersion};
use crate::platform::{PackageHandle, PlatformPackage};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

const LOOSE_PUBLISHER: &str = "CN=Unknown";

/// Current package of the running process, probed once.
static CURRENT: OnceLock<PackageHandle> = OnceLock::new();

/// Platform accessor for the running application's package.
///
/// The handle is probed on first call and stays alive for the process
/// lifetime; the platform owns its current package.
pub fn current_package() -> Result<PackageHandle> {
    if let Some(handle) = CURRENT.get() {
        return Ok(handle.clone());
    }

    let package = NativePackage::probe()?;
    Ok(CURRENT.get_or_init(|| Arc::new(package)).clone())
}

/// Package object backed by a directory on disk, described by a
/// `package.toml` manifest or synthesized from the executable when
/// deployed as loose files.
#[derive(Debug)]
pub struct NativePackage {
    identity: PackageId,
    install_dir: PathBuf,
    display_name: String,
    logo: Option<PathBuf>,
    development_mode: bool,
    installed_date: DateTime<Utc>,
    dependencies: Vec<Arc<NativePackage>>,
}

impl NativePackage {
    /// Probe the running process into a package object.
    fn probe() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| PkgInfoError::CurrentPackage(format!("Cannot resolve executable: {e}")))?;
        let install_dir = exe
            .parent()
            .ok_or_else(|| {
                PkgInfoError::CurrentPackage(format!("Executable {exe:?} has no parent directory"))
            })?
            .to_path_buf();

        if let Some(package) = Self::load(&install_dir)? {
            log::debug!("Current package loaded from manifest in {install_dir:?}");
            return Ok(package);
        }

        let name = exe
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());

        log::info!("No manifest for {exe:?}; reporting loose development package '{name}'");
        Ok(Self::loose(name, install_dir))
    }

    /// Load a manifest-backed package from its root directory.
    ///
    /// Returns `Ok(None)` when the directory has no manifest.
    pub fn load(package_root: &Path) -> Result<Option<Self>> {
        let Some(manifest) = PackageManifest::find(package_root)? else {
            return Ok(None);
        };
        Ok(Some(Self::from_manifest(package_root, manifest)?))
    }

    fn from_manifest(package_root: &Path, manifest: PackageManifest) -> Result<Self> {
        let mut dependencies = Vec::with_capacity(manifest.dependencies.len());
        for dependency_path in &manifest.dependencies {
            let dependency_root = package_root.join(dependency_path);
            match Self::load(&dependency_root) {
                Ok(Some(dependency)) => dependencies.push(Arc::new(dependency)),
                Ok(None) => {
                    log::warn!("Dependency {dependency_root:?} has no manifest, skipping");
                }
                Err(e) => {
                    log::warn!("Failed to load dependency {dependency_root:?}: {e}");
                }
            }
        }

        Ok(Self {
            identity: manifest.identity(),
            display_name: manifest
                .display_name
                .clone()
                .unwrap_or_else(|| manifest.name.clone()),
            logo: manifest.logo.as_ref().map(|logo| package_root.join(logo)),
            development_mode: manifest.development_mode,
            installed_date: directory_modified_date(package_root)?,
            install_dir: package_root.to_path_buf(),
            dependencies,
        })
    }

    /// Synthesize a loose-file (development mode) package.
    fn loose(name: String, install_dir: PathBuf) -> Self {
        Self {
            identity: PackageId::new(
                name.clone(),
                PackageVersion::new(1, 0, 0, 0),
                LOOSE_PUBLISHER.to_string(),
                Architecture::current(),
            ),
            display_name: name,
            logo: None,
            development_mode: true,
            installed_date: directory_modified_date(&install_dir).unwrap_or_else(|_| Utc::now()),
            install_dir,
            dependencies: Vec::new(),
        }
    }
}

impl PlatformPackage for NativePackage {
    fn identity(&self) -> PackageId {
        self.identity.clone()
    }

    fn installed_path(&self) -> PathBuf {
        self.install_dir.clone()
    }

    fn dependencies(&self) -> Vec<PackageHandle> {
        self.dependencies
            .iter()
            .map(|dep| dep.clone() as PackageHandle)
            .collect()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn logo(&self) -> Option<PathBuf> {
        self.logo.clone()
    }

    fn is_development_mode(&self) -> bool {
        self.development_mode
    }

    fn installed_date(&self) -> DateTime<Utc> {
        self.installed_date
    }
}

fn directory_modified_date(path: &Path) -> Result<DateTime<Utc>> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}
