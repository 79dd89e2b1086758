use std::sync::Arc;

use crate::{history::ApiClient, infra::config::AppConfig};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
}

impl AppContext {
    pub fn new(config: AppConfig, api: Arc<ApiClient>) -> Self {
        Self { config, api }
    }
}
