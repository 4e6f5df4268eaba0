use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::usecases::list_chats::DEFAULT_LATEST_CHATS_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub service: ServiceConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// When set, logs go to `chatsync.log` in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub fixture_path: PathBuf,
    /// Identity searches are scoped to.
    pub username: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fixture_path: PathBuf::from("chats.json"),
            username: "me".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    pub latest_chats_limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            latest_chats_limit: DEFAULT_LATEST_CHATS_LIMIT,
        }
    }
}
