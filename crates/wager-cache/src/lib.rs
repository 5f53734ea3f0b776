//! Write-behind account cache for the wager ledger.
//!
//! The cache is the single point of truth while the process runs:
//!
//! - [`bootstrap`] rebuilds it from the store at startup, merging the three
//!   grouped ledger sums into one statistics record per account.
//! - [`Ledger`] applies create/deposit/transaction operations under one
//!   coarse lock. Every deposit and transaction is appended to the ledger
//!   before the cached balance changes.
//! - [`FlushScheduler`] periodically persists dirty accounts and runs one
//!   last pass on shutdown.
//!
//! # Locking
//!
//! One mutex covers both the account map and the statistics map. All
//! operations on all accounts serialize against each other and against the
//! flusher, including the store round-trips they make while holding it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bootstrap;
pub mod error;
pub mod flusher;
pub mod ledger;

#[cfg(test)]
pub(crate) mod test_support;

pub use bootstrap::{bootstrap, BootstrapOptions, DEFAULT_BOOTSTRAP_TIMEOUT};
pub use error::{BootstrapError, LedgerError, Result};
pub use flusher::{FlushScheduler, DEFAULT_FLUSH_INTERVAL};
pub use ledger::{AccountView, CacheState, FlushReport, Ledger};
