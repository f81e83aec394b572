//! The watched file.

use std::path::{Path, PathBuf};

use crate::utils::path::resolve_file;

use super::ConfigError;

/// Absolute path of the watched file, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    path: PathBuf,
}

impl WatchTarget {
    /// Resolve `path` and check that its directory exists.
    ///
    /// The file itself may be absent: it is picked up on its first
    /// `Created` event.
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::MissingFile);
        }

        let path = resolve_file(path);
        let target = Self { path };
        if !target.dir().is_dir() {
            return Err(ConfigError::MissingDirectory(target.dir().to_path_buf()));
        }
        Ok(target)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory handed to the filesystem watcher.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("/"))
    }

    /// File name for log lines.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Whether an event path refers to this file.
    pub fn matches(&self, candidate: &Path) -> bool {
        candidate == self.path || resolve_file(candidate) == self.path
    }
}
