use crate::infra::{config::AppConfig, fixture_service::FixtureChatService};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub service: FixtureChatService,
}

impl AppContext {
    pub fn new(config: AppConfig, service: FixtureChatService) -> Self {
        Self { config, service }
    }
}
