use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::store::MessageStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable message store. Swap via CONTACT_STORE.
    pub store: Arc<dyn MessageStore>,
    pub resume_path: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            resume_path: config.resume_path.clone(),
        }
    }
}
