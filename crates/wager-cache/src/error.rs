//! Error types for the account cache.

use std::time::Duration;

use wager_core::{AccountId, Decimal};
use wager_store::StoreError;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors returned by ledger operations.
///
/// Closed set; the transport maps each variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// No account with this id.
    #[error("account not found: {account_id}")]
    NotFound {
        /// The id that was looked up.
        account_id: AccountId,
    },

    /// The account exists but the token does not match.
    #[error("wrong token for account {account_id}")]
    WrongToken {
        /// The account whose token was presented.
        account_id: AccountId,
    },

    /// A bet would drive the balance negative.
    #[error("insufficient balance: balance={balance}, required={required}")]
    InsufficientBalance {
        /// Current balance.
        balance: Decimal,
        /// Amount of the bet.
        required: Decimal,
    },

    /// The new balance or a statistics sum would leave the `Decimal` range.
    /// Rejected before anything is persisted.
    #[error("amount out of range for account {account_id}")]
    AmountOverflow {
        /// The account the operation targeted.
        account_id: AccountId,
    },

    /// The store rejected the ledger append.
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A store call failed.
    #[error("bootstrap step {step} failed: {source}")]
    Store {
        /// The step that failed.
        step: &'static str,
        /// The underlying store error.
        source: StoreError,
    },

    /// A store call did not finish in time.
    #[error("bootstrap step {step} timed out after {timeout:?}")]
    Timeout {
        /// The step that timed out.
        step: &'static str,
        /// The configured limit.
        timeout: Duration,
    },

    /// The blocking task running a store call panicked or was cancelled.
    #[error("bootstrap step {step} aborted: {message}")]
    Aborted {
        /// The step that was aborted.
        step: &'static str,
        /// Join error description.
        message: String,
    },
}
