use std::sync::Arc;
use crate::TradeService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TradeService>,
}

impl AppState {
    pub fn new(service: Arc<TradeService>) -> Self {
        Self { service }
    }
}
