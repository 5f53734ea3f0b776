//! Request and response types for the wager API.
//!
//! Amounts go out as decimal strings so no precision is lost in transit; the
//! service returns them as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wager_core::{AccountId, DepositId, Statistics, TransactionId, TransactionType};

/// Create account request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountRequest {
    /// Account id.
    pub id: AccountId,
    /// Opening balance.
    pub balance: Decimal,
    /// Bearer token.
    pub token: String,
}

/// Get account request.
#[derive(Debug, Clone, Serialize)]
pub struct GetAccountRequest {
    /// Account id.
    pub id: AccountId,
    /// Bearer token.
    pub token: String,
}

/// Deposit request.
#[derive(Debug, Clone, Serialize)]
pub struct DepositRequest {
    /// Account credited.
    pub user_id: AccountId,
    /// Ledger id of the deposit.
    pub deposit_id: DepositId,
    /// Amount deposited.
    pub amount: Decimal,
    /// Bearer token.
    pub token: String,
}

/// Bet/win request.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    /// Account affected.
    pub user_id: AccountId,
    /// Ledger id of the transaction.
    pub transaction_id: TransactionId,
    /// Bet or win.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount staked or paid out.
    pub amount: Decimal,
    /// Bearer token.
    pub token: String,
}

/// Account balance and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountResponse {
    /// Account id.
    pub id: AccountId,
    /// Current balance.
    pub balance: Decimal,
    /// Number of deposits.
    pub deposit_count: u64,
    /// Sum of deposits.
    pub deposit_sum: Decimal,
    /// Number of bets.
    pub bet_count: u64,
    /// Sum of bets.
    pub bet_sum: Decimal,
    /// Number of wins.
    pub win_count: u64,
    /// Sum of wins.
    pub win_sum: Decimal,
}

impl AccountResponse {
    /// The statistics part of the response.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics {
            deposit_count: self.deposit_count,
            deposit_sum: self.deposit_sum,
            bet_count: self.bet_count,
            bet_sum: self.bet_sum,
            win_count: self.win_count,
            win_sum: self.win_sum,
        }
    }
}

/// Balance after a deposit or transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    /// New balance.
    pub balance: Decimal,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
