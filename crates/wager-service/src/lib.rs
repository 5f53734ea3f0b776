//! Wager ledger HTTP API service.
//!
//! A thin transport over the account cache in `wager-cache`:
//!
//! - Account creation and lookup
//! - Deposits
//! - Bet/win transactions
//!
//! Requests are validated here; every ledger outcome is mapped to a status
//! code by [`ApiError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for the router even when the body is sync

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
