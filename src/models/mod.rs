pub mod identity;
pub mod version;

pub use identity::{Architecture, PackageId};
pub use version::PackageVersion;
