use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::store::InMemoryStore;

/// Shared application state
///
/// Read handlers hold the store's read guard for the whole engine call, so
/// a prediction never observes a half-applied rating submission.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub config: Arc<Config>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryStore::new(), Config::default())
    }
}

impl AppState {
    pub fn new(store: InMemoryStore, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }
}
