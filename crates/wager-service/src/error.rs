//! API error types and responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use wager_cache::LedgerError;
use wager_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown account.
    #[error("not found: {0}")]
    NotFound(String),

    /// Token does not match the account.
    #[error("wrong token: {0}")]
    WrongToken(String),

    /// Bet larger than the balance.
    #[error("insufficient balance: balance={balance}, required={required}")]
    InsufficientBalance {
        /// Current balance.
        balance: Decimal,
        /// Amount of the bet.
        required: Decimal,
    },

    /// Ledger id already used.
    #[error("duplicate record: {0}")]
    DuplicateRecord(String),

    /// Bad request - malformed or invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct BalanceDetails {
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    required: Decimal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::WrongToken(msg) => (StatusCode::BAD_REQUEST, "wrong_token", msg.clone(), None),
            Self::InsufficientBalance { balance, required } => (
                StatusCode::BAD_REQUEST,
                "insufficient_balance",
                self.to_string(),
                serde_json::to_value(BalanceDetails {
                    balance: *balance,
                    required: *required,
                })
                .ok(),
            ),
            Self::DuplicateRecord(msg) => {
                (StatusCode::CONFLICT, "duplicate_record", msg.clone(), None)
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { account_id } => {
                Self::NotFound(format!("account not found: {account_id}"))
            }
            LedgerError::WrongToken { .. } => Self::WrongToken("wrong token".into()),
            LedgerError::InsufficientBalance { balance, required } => {
                Self::InsufficientBalance { balance, required }
            }
            LedgerError::AmountOverflow { account_id } => {
                Self::BadRequest(format!("amount out of range for account {account_id}"))
            }
            LedgerError::Persistence(StoreError::DuplicateRecord { entity, id }) => {
                Self::DuplicateRecord(format!("{entity} {id} already recorded"))
            }
            LedgerError::Persistence(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
