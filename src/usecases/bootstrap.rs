use std::path::Path;

use crate::{
    infra::{
        self,
        config::FileConfigAdapter,
        contracts::ConfigAdapter,
        error::AppError,
        fixture_service::FixtureChatService,
        logging::LoggingGuard,
    },
    usecases::context::AppContext,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<(AppContext, LoggingGuard), AppError> {
    let context = build_context(&FileConfigAdapter::new(config_path))?;
    let guard = infra::logging::init(&context.config.logging)?;

    Ok((context, guard))
}

fn build_context(config_adapter: &dyn ConfigAdapter) -> Result<AppContext, AppError> {
    let config = config_adapter.load()?;
    let service = FixtureChatService::load(&config.service.fixture_path)?;

    Ok(AppContext::new(config, service))
}
