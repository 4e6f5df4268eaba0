use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
};

/// Reads configuration from a TOML file, falling back to defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        load(self.path.as_deref()).context("configuration could not be loaded")
    }
}
