use std::{path::Path, sync::Arc};

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    history::ApiClient,
    infra::{self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError},
    usecases::context::AppContext,
};

pub struct Bootstrap {
    pub context: AppContext,
    /// Keeps the non-blocking log writer alive for the process lifetime.
    pub log_guard: Option<WorkerGuard>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<Bootstrap, AppError> {
    let context = build_context(config_path)?;
    let log_guard = infra::logging::init(&context.config.logging)?;

    Ok(Bootstrap { context, log_guard })
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load().map_err(AppError::Other)?;
    let api = ApiClient::new(&config.server).map_err(AppError::HistoryClientInit)?;

    Ok(AppContext::new(config, Arc::new(api)))
}
