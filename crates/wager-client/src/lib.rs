//! Wager Client SDK.
//!
//! This crate provides a client library for the wager ledger HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use wager_client::WagerClient;
//! use wager_core::{AccountId, Decimal, DepositId, TransactionId, TransactionType};
//!
//! # async fn example() -> Result<(), wager_client::ClientError> {
//! let client = WagerClient::new("http://wager:8080")?;
//!
//! let account = AccountId::new(1);
//! client.create_account(account, Decimal::from(75), "t1").await?;
//! client.deposit(account, DepositId::new(1), Decimal::from(50), "t1").await?;
//!
//! let balance = client
//!     .transaction(account, TransactionId::new(1), TransactionType::Bet, Decimal::from(20), "t1")
//!     .await?;
//! println!("New balance: {balance}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, WagerClient};
pub use error::ClientError;
pub use types::*;
