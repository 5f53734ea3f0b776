//! Key encoding utilities for `RocksDB`.
//!
//! All keys are the 8-byte big-endian encoding of the record's own id.

use wager_core::{AccountId, DepositId, TransactionId};

/// Create an account key from an account id.
#[must_use]
pub fn account_key(id: AccountId) -> [u8; 8] {
    id.to_be_bytes()
}

/// Create a deposit key from a deposit id.
#[must_use]
pub fn deposit_key(id: DepositId) -> [u8; 8] {
    id.to_be_bytes()
}

/// Create a transaction key from a transaction id.
#[must_use]
pub fn transaction_key(id: TransactionId) -> [u8; 8] {
    id.to_be_bytes()
}
