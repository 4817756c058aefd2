use std::sync::Arc;

use crate::config::Config;
use crate::services::MemoryService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub memory: Arc<MemoryService>,
}

impl AppState {
    /// State backed by the JSON file store named in `config`.
    pub fn new(config: Config) -> Self {
        let memory = MemoryService::from_config(&config);
        Self::with_service(config, memory)
    }

    pub fn with_service(config: Config, memory: MemoryService) -> Self {
        Self {
            config: Arc::new(config),
            memory: Arc::new(memory),
        }
    }
}
