use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Portable handle to a folder on disk.
///
/// Thin value type over the folder's path; callers that need real I/O go
/// through `std::fs` with the path this hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageFolder {
    path: PathBuf,
}

impl StorageFolder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Final component of the folder path, empty for roots.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Last-modified time of the folder, if it can be read.
    pub fn modified_date(&self) -> Option<DateTime<Utc>> {
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok()?;
        Some(DateTime::<Utc>::from(modified))
    }
}
