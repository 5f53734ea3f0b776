//! Error types for wager storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record looked up.
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// An append-only record with this id already exists.
    #[error("duplicate {entity}: {id}")]
    DuplicateRecord {
        /// The kind of record.
        entity: &'static str,
        /// The id that was already present.
        id: String,
    },

    /// A grouped sum over the ledger left the `Decimal` range.
    #[error("{entity} totals out of range for account {account_id}")]
    Overflow {
        /// The kind of record summed.
        entity: &'static str,
        /// The account whose totals overflowed.
        account_id: String,
    },
}
