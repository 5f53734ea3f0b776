//! API handlers.

pub mod accounts;
pub mod health;
pub mod transactions;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use wager_cache::{Ledger, LedgerError};

use crate::error::ApiError;
use crate::state::AppState;

/// Balance after a deposit or transaction.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// New balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

fn require_id(field: &str, value: u64) -> Result<(), ApiError> {
    if value == 0 {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

fn require_token(token: &str) -> Result<(), ApiError> {
    if token.is_empty() {
        return Err(ApiError::BadRequest("token is required".into()));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> Result<(), ApiError> {
    if value < Decimal::ZERO {
        return Err(ApiError::BadRequest(format!("{field} must be non-negative")));
    }
    Ok(())
}

/// Run a ledger call on the blocking pool.
///
/// Ledger calls wait on the cache lock and write to the store, and the
/// flusher holds that lock for a whole pass.
async fn with_ledger<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Ledger) -> Result<T, LedgerError> + Send + 'static,
{
    let ledger = Arc::clone(&state.ledger);
    tokio::task::spawn_blocking(move || call(&ledger))
        .await
        .map_err(|e| ApiError::Internal(format!("ledger task failed: {e}")))?
        .map_err(ApiError::from)
}
