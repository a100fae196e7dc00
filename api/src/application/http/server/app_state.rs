use std::sync::Arc;

use buywise_core::application::BuywiseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: BuywiseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: BuywiseService) -> Self {
        Self { args, service }
    }
}
