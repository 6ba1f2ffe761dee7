//! The portable package adapter.
//!
//! [`Package`] wraps a platform package object behind a weak reference and
//! projects its properties into the portable shape. The platform owns the
//! object; once it drops the handle, every accessor degrades to `None`
//! instead of failing.

mod current;

use crate::error::{PkgInfoError, Result};
use crate::models::PackageId;
use crate::platform::{self, PackageHandle, PlatformPackage};
use crate::storage::StorageFolder;
use chrono::{DateTime, Utc};
use current::CurrentSlot;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, Weak};

static CURRENT: CurrentSlot<fn() -> Result<PackageHandle>> =
    CurrentSlot::new(platform::current_package);

/// Capability surface of a package, consumed by portable code that must
/// not name the platform type.
pub trait PackageInformation {
    fn id(&self) -> Option<&PackageId>;
    fn installed_location(&self) -> Option<StorageFolder>;
    fn dependencies(&self) -> Option<&[Package]>;
    fn display_name(&self) -> Option<String>;
    fn logo(&self) -> Option<PathBuf>;
    fn is_development_mode(&self) -> Option<bool>;
    fn installed_date(&self) -> Option<DateTime<Utc>>;
}

/// Adapter over a platform package object.
///
/// Identity and dependencies are computed once and stay stable for the
/// adapter's lifetime; everything else reads through to the originator on
/// every call.
#[derive(Debug)]
pub struct Package {
    originator: Weak<dyn PlatformPackage>,
    id: OnceLock<PackageId>,
    dependencies: OnceLock<Vec<Package>>,
}

impl Package {
    /// Wrap a platform package handle.
    ///
    /// Fails with [`PkgInfoError::MissingPackage`] when the handle is
    /// absent, i.e. the weak reference cannot be upgraded at construction.
    pub fn new(originator: Weak<dyn PlatformPackage>) -> Result<Self> {
        if originator.upgrade().is_none() {
            return Err(PkgInfoError::MissingPackage);
        }

        Ok(Self {
            originator,
            id: OnceLock::new(),
            dependencies: OnceLock::new(),
        })
    }

    pub(crate) fn from_handle(handle: &PackageHandle) -> Self {
        Self {
            originator: Arc::downgrade(handle),
            id: OnceLock::new(),
            dependencies: OnceLock::new(),
        }
    }

    /// The package of the running application.
    ///
    /// Returns the process-wide cached adapter while its backing reference
    /// is live; otherwise a fresh handle is fetched from the platform and
    /// the cached adapter is replaced wholesale.
    pub fn current() -> Result<Arc<Package>> {
        CURRENT.get()
    }

    /// Unwrap back to the platform handle, `None` once the platform has
    /// dropped the object.
    pub fn originator(&self) -> Option<PackageHandle> {
        self.originator.upgrade()
    }

    /// Package identity, computed from the originator on first access and
    /// cached for the adapter's lifetime.
    pub fn id(&self) -> Option<&PackageId> {
        if let Some(id) = self.id.get() {
            return Some(id);
        }

        let originator = self.originator()?;
        Some(self.id.get_or_init(|| originator.identity()))
    }

    /// Folder the package is installed in, re-resolved on every call.
    pub fn installed_location(&self) -> Option<StorageFolder> {
        Some(StorageFolder::new(self.originator()?.installed_path()))
    }

    /// Packages this package depends on, each wrapped in its own adapter.
    /// Computed once, in originator order, and cached.
    pub fn dependencies(&self) -> Option<&[Package]> {
        if let Some(dependencies) = self.dependencies.get() {
            return Some(dependencies.as_slice());
        }

        let originator = self.originator()?;
        let dependencies = self.dependencies.get_or_init(|| {
            originator
                .dependencies()
                .iter()
                .map(Self::from_handle)
                .collect()
        });
        Some(dependencies.as_slice())
    }

    pub fn display_name(&self) -> Option<String> {
        Some(self.originator()?.display_name())
    }

    pub fn logo(&self) -> Option<PathBuf> {
        self.originator()?.logo()
    }

    pub fn is_development_mode(&self) -> Option<bool> {
        Some(self.originator()?.is_development_mode())
    }

    pub fn installed_date(&self) -> Option<DateTime<Utc>> {
        Some(self.originator()?.installed_date())
    }
}

impl PackageInformation for Package {
    fn id(&self) -> Option<&PackageId> {
        Package::id(self)
    }

    fn installed_location(&self) -> Option<StorageFolder> {
        Package::installed_location(self)
    }

    fn dependencies(&self) -> Option<&[Package]> {
        Package::dependencies(self)
    }

    fn display_name(&self) -> Option<String> {
        Package::display_name(self)
    }

    fn logo(&self) -> Option<PathBuf> {
        Package::logo(self)
    }

    fn is_development_mode(&self) -> Option<bool> {
        Package::is_development_mode(self)
    }

    fn installed_date(&self) -> Option<DateTime<Utc>> {
        Package::installed_date(self)
    }
}
