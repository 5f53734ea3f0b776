//! Core types for the wager ledger.
//!
//! This crate provides the foundational types shared by the store, the cache
//! and the HTTP service:
//!
//! - **Identifiers**: `AccountId`, `DepositId`, `TransactionId`
//! - **Accounts**: `Account`, `AccountStatus`
//! - **Statistics**: `Statistics`, `Totals`, `BetSumMode`
//! - **Ledger**: `DepositRecord`, `TransactionRecord`, `TransactionType`
//!
//! # Money
//!
//! Balances and amounts are `rust_decimal::Decimal`, an exact signed decimal.
//! A balance is semantically non-negative; only a bet is ever allowed to
//! lower it, and only when the balance covers the amount.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod statistics;

pub use account::{Account, AccountStatus};
pub use error::{AmountOverflow, ParseError};
pub use ids::{AccountId, DepositId, TransactionId};
pub use ledger::{DepositRecord, TransactionRecord, TransactionType};
pub use rust_decimal::Decimal;
pub use statistics::{merge_partials, BetSumMode, Statistics, Totals};
