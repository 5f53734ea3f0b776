//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Account records, keyed by account id.
    pub const ACCOUNTS: &str = "accounts";

    /// Deposit ledger entries, keyed by deposit id. Append-only.
    pub const DEPOSITS: &str = "deposits";

    /// Bet/win ledger entries, keyed by transaction id. Append-only.
    pub const TRANSACTIONS: &str = "transactions";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::ACCOUNTS, cf::DEPOSITS, cf::TRANSACTIONS]
}
