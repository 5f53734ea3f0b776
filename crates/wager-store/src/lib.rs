//! `RocksDB` storage layer for the wager ledger.
//!
//! This crate provides durable storage for accounts and the append-only
//! deposit/transaction ledger, plus the grouped sums the bootstrap uses to
//! re-derive per-account statistics.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `accounts`: Account records, keyed by account id
//! - `deposits`: Deposit ledger entries, keyed by deposit id
//! - `transactions`: Bet/win ledger entries, keyed by transaction id
//!
//! # Example
//!
//! ```no_run
//! use wager_core::{Account, AccountId, Decimal};
//! use wager_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/wager-db").unwrap();
//!
//! let account = Account::new(AccountId::new(1), Decimal::from(75), "token");
//! store.insert_accounts(&[account]).unwrap();
//!
//! let accounts = store.load_accounts().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

use std::collections::HashMap;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use wager_core::{
    Account, AccountId, DepositRecord, Totals, TransactionRecord, TransactionType,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing the cache to run against
/// `RocksDB` in production and against wrappers with injected failures in
/// tests.
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Load every stored account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn load_accounts(&self) -> Result<Vec<Account>>;

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, id: AccountId) -> Result<Option<Account>>;

    /// Insert a batch of accounts in one atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails. Nothing is written
    /// in that case.
    fn insert_accounts(&self, accounts: &[Account]) -> Result<()>;

    /// Overwrite an existing account, keyed by its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account was never inserted.
    fn update_account(&self, account: &Account) -> Result<()>;

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Append a deposit record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateRecord` if the deposit id is taken.
    fn insert_deposit(&self, record: &DepositRecord) -> Result<()>;

    /// Append a bet/win record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateRecord` if the transaction id is taken.
    fn insert_transaction(&self, record: &TransactionRecord) -> Result<()>;

    // =========================================================================
    // Aggregations
    // =========================================================================

    /// Count and sum deposits, grouped by account id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn aggregate_deposits(&self) -> Result<HashMap<AccountId, Totals>>;

    /// Count and sum transactions of one type, grouped by account id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn aggregate_transactions(
        &self,
        transaction_type: TransactionType,
    ) -> Result<HashMap<AccountId, Totals>>;
}
