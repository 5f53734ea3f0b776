//! Client error types.

use rust_decimal::Decimal;

/// Errors that can occur when using the wager client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Account not found.
    #[error("not found: {message}")]
    NotFound {
        /// Server message.
        message: String,
    },

    /// Token rejected for the account.
    #[error("wrong token")]
    WrongToken,

    /// Bet larger than the balance.
    #[error("insufficient balance: balance={balance}, required={required}")]
    InsufficientBalance {
        /// Current balance.
        balance: Decimal,
        /// Amount of the bet.
        required: Decimal,
    },

    /// Deposit or transaction id already used.
    #[error("duplicate record: {message}")]
    DuplicateRecord {
        /// Server message.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
