use std::sync::Arc;

use crate::processors::QueryDispatcher;

/// Shared by every request; holds the engine-selection state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<QueryDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self { dispatcher }
    }
}
