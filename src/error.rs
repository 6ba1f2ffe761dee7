use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgInfoError {
    #[error("Platform package reference is absent")]
    MissingPackage,

    #[error("Invalid package version: {0}")]
    InvalidVersion(String),

    #[error("Invalid package manifest: {0}")]
    InvalidManifest(String),

    #[error("Failed to determine current package: {0}")]
    CurrentPackage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PkgInfoError>;
