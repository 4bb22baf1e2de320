/// Shared application state
use std::sync::Arc;
use theirside_core::Podcast;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub podcast: Arc<Podcast>,
}

impl AppState {
    pub fn new(podcast: Podcast) -> Self {
        Self {
            podcast: Arc::new(podcast),
        }
    }
}
