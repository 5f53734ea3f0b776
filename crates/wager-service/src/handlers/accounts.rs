//! Account handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wager_cache::AccountView;
use wager_core::{AccountId, DepositId};

use super::{require_id, require_non_negative, require_token, with_ledger, BalanceResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Account response: balance plus statistics.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account id.
    pub id: u64,
    /// Current balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Number of deposits.
    pub deposit_count: u64,
    /// Sum of deposits.
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit_sum: Decimal,
    /// Number of bets.
    pub bet_count: u64,
    /// Sum of bets.
    #[serde(with = "rust_decimal::serde::float")]
    pub bet_sum: Decimal,
    /// Number of wins.
    pub win_count: u64,
    /// Sum of wins.
    #[serde(with = "rust_decimal::serde::float")]
    pub win_sum: Decimal,
}

impl From<AccountView> for AccountResponse {
    fn from(view: AccountView) -> Self {
        let stats = view.statistics;
        Self {
            id: view.id.get(),
            balance: view.balance,
            deposit_count: stats.deposit_count,
            deposit_sum: stats.deposit_sum,
            bet_count: stats.bet_count,
            bet_sum: stats.bet_sum,
            win_count: stats.win_count,
            win_sum: stats.win_sum,
        }
    }
}

/// Create account request.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account id.
    pub id: u64,
    /// Opening balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Bearer token for later requests.
    pub token: String,
}

impl CreateAccountRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_id("id", self.id)?;
        require_non_negative("balance", self.balance)?;
        require_token(&self.token)
    }
}

/// Get account request.
#[derive(Debug, Deserialize)]
pub struct GetAccountRequest {
    /// Account id.
    pub id: u64,
    /// Bearer token.
    pub token: String,
}

impl GetAccountRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_id("id", self.id)?;
        require_token(&self.token)
    }
}

/// Deposit request.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    /// Account credited.
    pub user_id: u64,
    /// Ledger id of the deposit.
    pub deposit_id: u64,
    /// Amount deposited.
    pub amount: Decimal,
    /// Bearer token.
    pub token: String,
}

impl DepositRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_id("user_id", self.user_id)?;
        require_id("deposit_id", self.deposit_id)?;
        require_non_negative("amount", self.amount)?;
        require_token(&self.token)
    }
}

/// Create an account, replacing any account with the same id.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(body) = payload?;
    body.validate()?;

    let view = with_ledger(&state, move |ledger| {
        Ok(ledger.create_account(AccountId::new(body.id), body.balance, &body.token))
    })
    .await?;

    Ok(Json(view.into()))
}

/// Get an account and its statistics.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GetAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(body) = payload?;
    body.validate()?;

    let view = with_ledger(&state, move |ledger| {
        ledger.get_account(AccountId::new(body.id), &body.token)
    })
    .await?;

    Ok(Json(view.into()))
}

/// Deposit into an account.
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let Json(body) = payload?;
    body.validate()?;

    let balance = with_ledger(&state, move |ledger| {
        ledger.deposit(
            AccountId::new(body.user_id),
            DepositId::new(body.deposit_id),
            body.amount,
            &body.token,
        )
    })
    .await?;

    Ok(Json(BalanceResponse { balance }))
}
