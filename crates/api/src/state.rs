use std::sync::Arc;

use quizbank_db::store::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store holding users, questions and tests.
    pub store: Arc<dyn DocumentStore>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Borrow the store as a trait object for repository calls.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
