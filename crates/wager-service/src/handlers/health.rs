//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::with_ledger;
use crate::error::ApiError;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Cached accounts.
    pub accounts: usize,
    /// Accounts waiting for the flusher.
    pub dirty: usize,
}

/// Health check endpoint.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let (accounts, dirty) =
        with_ledger(&state, |ledger| Ok((ledger.account_count(), ledger.dirty_count()))).await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        service: "wager".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        accounts,
        dirty,
    }))
}
