//! Application state.

use std::sync::Arc;

use wager_cache::Ledger;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The bootstrapped account cache.
    pub ledger: Arc<Ledger>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(ledger: Arc<Ledger>, config: ServiceConfig) -> Self {
        Self { ledger, config }
    }
}
