use crate::usecases::contracts::MessageLoader;

#[cfg(test)]
use std::path::Path;

#[cfg(test)]
use anyhow::Result;

#[cfg(test)]
use crate::infra::{config::AppConfig, contracts::ConfigAdapter};

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter {
    config: AppConfig,
}

#[cfg(test)]
impl StubConfigAdapter {
    pub fn with_fixture_path(path: &Path) -> Self {
        let mut config = AppConfig::default();
        config.service.fixture_path = path.to_path_buf();
        Self { config }
    }
}

#[cfg(test)]
impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(self.config.clone())
    }
}

/// Message loader for runs without a message subsystem: the request is only logged.
#[derive(Debug, Clone, Default)]
pub struct LoggingMessageLoader;

impl MessageLoader for LoggingMessageLoader {
    fn load_chat_messages(&self, chat_id: i64) {
        tracing::info!(chat_id, "message history requested");
    }
}
