use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, ServiceConfig, SyncConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub service: Option<FileServiceConfig>,
    pub sync: Option<FileSyncConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(service) = self.service {
            service.merge_into(&mut config.service);
        }

        if let Some(sync) = self.sync {
            sync.merge_into(&mut config.sync);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub directory: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(directory) = self.directory {
            config.directory = Some(directory);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServiceConfig {
    pub fixture_path: Option<PathBuf>,
    pub username: Option<String>,
}

impl FileServiceConfig {
    fn merge_into(self, config: &mut ServiceConfig) {
        if let Some(fixture_path) = self.fixture_path {
            config.fixture_path = fixture_path;
        }

        if let Some(username) = self.username {
            config.username = username;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSyncConfig {
    pub latest_chats_limit: Option<usize>,
}

impl FileSyncConfig {
    fn merge_into(self, config: &mut SyncConfig) {
        if let Some(limit) = self.latest_chats_limit {
            config.latest_chats_limit = limit;
        }
    }
}
