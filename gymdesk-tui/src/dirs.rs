//! Where the dashboard keeps its files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Data and cache directories for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    data: PathBuf,
    cache: PathBuf,
}

impl AppDirs {
    /// Platform locations (XDG on Linux). `None` without a home directory.
    pub fn discover() -> Option<Self> {
        let dirs = ProjectDirs::from("dev", "gymdesk", "gymdesk")?;
        Some(Self {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Everything under one root, as `<root>/data` and `<root>/cache`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data: root.join("data"),
            cache: root.join("cache"),
        }
    }

    pub fn settings_db(&self) -> PathBuf {
        self.data.join("settings.db")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.cache.join("logs")
    }
}
