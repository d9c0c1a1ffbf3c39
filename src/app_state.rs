use std::sync::Arc;

use crate::analysis::Pipeline;
use crate::config::Config;
use crate::models::Models;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, models: Models) -> Self {
        Self {
            pipeline: Pipeline::new(models),
            config: Arc::new(config),
        }
    }
}
