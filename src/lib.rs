pub mod error;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod package;
pub mod platform;
pub mod storage;

pub use error::{PkgInfoError, Result};
pub use package::{Package, PackageInformation};
