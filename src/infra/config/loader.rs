use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Loads configuration layered over the defaults.
///
/// Without `path`, `./config.toml` is optional. An explicit `path` must exist.
/// Relative `service.fixture_path` and `logging.directory` values are resolved
/// against the directory of the file that set them.
pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::default();

    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default_path.exists() {
                return Ok(config);
            }
            default_path
        }
    };

    let mut file_config = read_file_config(&config_path)?;
    if let Some(base) = config_path.parent() {
        anchor_paths(&mut file_config, base);
    }
    file_config.merge_into(&mut config);

    tracing::debug!(path = %config_path.display(), "configuration loaded");
    Ok(config)
}

fn read_file_config(path: &Path) -> Result<FileConfig, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn anchor_paths(file_config: &mut FileConfig, base: &Path) {
    let fixture_path = file_config
        .service
        .as_mut()
        .and_then(|service| service.fixture_path.as_mut());
    if let Some(path) = fixture_path {
        *path = anchor(base, path);
    }

    let directory = file_config
        .logging
        .as_mut()
        .and_then(|logging| logging.directory.as_mut());
    if let Some(path) = directory {
        *path = anchor(base, path);
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
