//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::MensaConfig;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; hands out the configuration and the shared
/// store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MensaConfig,
    store: Store,
}

impl AppState {
    /// Create a new application state around an empty store.
    #[must_use]
    pub fn new(config: MensaConfig) -> Self {
        Self::with_store(config, Store::new())
    }

    /// Create a new application state around an existing store. Used by
    /// tests that pre-seed data.
    #[must_use]
    pub fn with_store(config: MensaConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &MensaConfig {
        &self.inner.config
    }

    /// Get a reference to the shared store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
