use std::path::{Path, PathBuf};

use colorlog_core::platform::AppPaths;
use colorlog_core::{RootLocator, RootNotFound};

pub const LOCAL_CONFIG: &str = "colorlog.toml";

/// Paths anchored at the discovered project root.
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn discover() -> Result<Self, RootNotFound> {
        let root = RootLocator::new()
            .start(colorlog_core::caller_dir!())
            .find()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AppPaths for ProjectPaths {
    fn config_path(&self) -> PathBuf {
        let local = self.root.join(LOCAL_CONFIG);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("colorlog")
            .join("config.toml")
    }
}
