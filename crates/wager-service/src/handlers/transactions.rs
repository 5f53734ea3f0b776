//! Bet/win transaction handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use wager_core::{AccountId, TransactionId, TransactionType};

use super::{require_id, require_non_negative, require_token, with_ledger, BalanceResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Transaction request.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// Account affected.
    pub user_id: u64,
    /// Ledger id of the transaction.
    pub transaction_id: u64,
    /// `Bet` or `Win`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Amount staked or paid out.
    pub amount: Decimal,
    /// Bearer token.
    pub token: String,
}

impl TransactionRequest {
    fn validate(&self) -> Result<TransactionType, ApiError> {
        require_id("user_id", self.user_id)?;
        require_id("transaction_id", self.transaction_id)?;
        require_non_negative("amount", self.amount)?;
        require_token(&self.token)?;
        self.transaction_type
            .parse()
            .map_err(|e: wager_core::ParseError| ApiError::BadRequest(e.to_string()))
    }
}

/// Apply a bet or a win.
pub async fn transaction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let Json(body) = payload?;
    let transaction_type = body.validate()?;

    let balance = with_ledger(&state, move |ledger| {
        ledger.transaction(
            AccountId::new(body.user_id),
            TransactionId::new(body.transaction_id),
            transaction_type,
            body.amount,
            &body.token,
        )
    })
    .await?;

    Ok(Json(BalanceResponse { balance }))
}
