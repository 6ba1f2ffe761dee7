//! Platform side of the package model.
//!
//! `PlatformPackage` is the contract a platform package object fulfills;
//! the adapter in [`crate::package`] observes these objects through weak
//! handles and never owns them. The native backend probes the running
//! process and is the default provider for the current package.

mod native;

pub use native::{NativePackage, current_package};

use crate::models::PackageId;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

/// Owning handle to a platform package object. The platform (or a test
/// fixture) holds these; adapters hold `Weak` observations of them.
pub type PackageHandle = Arc<dyn PlatformPackage>;

/// A platform-native application package object.
pub trait PlatformPackage: Send + Sync {
    /// Identity of the package.
    fn identity(&self) -> PackageId;

    /// Directory the package is installed in.
    fn installed_path(&self) -> PathBuf;

    /// Packages this package depends on, in declaration order.
    fn dependencies(&self) -> Vec<PackageHandle>;

    /// Human-readable package name.
    fn display_name(&self) -> String;

    /// Path of the package logo image, if the package carries one.
    fn logo(&self) -> Option<PathBuf>;

    /// Whether the package is deployed in development mode (loose files
    /// rather than an installed, manifest-backed deployment).
    fn is_development_mode(&self) -> bool;

    /// When the package was installed or last updated.
    fn installed_date(&self) -> DateTime<Utc>;
}
