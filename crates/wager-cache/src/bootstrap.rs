//! Startup load of the cache from the store.
//!
//! Accounts come back verbatim. Statistics are re-derived from the ledger by
//! three grouped sums whose partial records are merged field by field.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use wager_core::{merge_partials, AccountId, BetSumMode, Statistics, Totals, TransactionType};
use wager_store::{Store, StoreError};

use crate::error::BootstrapError;
use crate::ledger::{CacheState, Ledger};

/// Default limit for each bootstrap store call.
pub const DEFAULT_BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(30);

/// Bootstrap settings.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapOptions {
    /// Limit applied to each store call separately.
    pub timeout: Duration,
    /// How stored bets are folded into `bet_sum`.
    pub bet_sum_mode: BetSumMode,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_BOOTSTRAP_TIMEOUT,
            bet_sum_mode: BetSumMode::default(),
        }
    }
}

/// Run one blocking store call on the blocking pool, bounded by `timeout`.
async fn run_step<T, F>(
    store: &Arc<dyn Store>,
    step: &'static str,
    timeout: Duration,
    call: F,
) -> Result<T, BootstrapError>
where
    T: Send + 'static,
    F: FnOnce(&dyn Store) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    let task = tokio::task::spawn_blocking(move || call(&*store));

    match tokio::time::timeout(timeout, task).await {
        Err(_) => Err(BootstrapError::Timeout { step, timeout }),
        Ok(Err(join)) => Err(BootstrapError::Aborted {
            step,
            message: join.to_string(),
        }),
        Ok(Ok(Err(source))) => Err(BootstrapError::Store { step, source }),
        Ok(Ok(Ok(value))) => Ok(value),
    }
}

fn partial(
    totals: HashMap<AccountId, Totals>,
    build: impl Fn(Totals) -> Statistics,
) -> HashMap<AccountId, Statistics> {
    totals.into_iter().map(|(id, t)| (id, build(t))).collect()
}

/// Load every account and re-derive its statistics.
///
/// Any failing or timed-out step aborts the whole bootstrap; a partial cache
/// is never returned.
///
/// # Errors
///
/// Returns the first step that failed.
pub async fn bootstrap(
    store: Arc<dyn Store>,
    options: BootstrapOptions,
) -> Result<CacheState, BootstrapError> {
    let timeout = options.timeout;
    let mode = options.bet_sum_mode;

    tracing::info!(timeout = ?timeout, bet_sum_mode = %mode, "Bootstrapping account cache");

    let accounts = run_step(&store, "load_accounts", timeout, |s| s.load_accounts()).await?;
    tracing::debug!(count = accounts.len(), "Loaded accounts");

    let deposits =
        run_step(&store, "aggregate_deposits", timeout, |s| s.aggregate_deposits()).await?;
    let bets = run_step(&store, "aggregate_bets", timeout, |s| {
        s.aggregate_transactions(TransactionType::Bet)
    })
    .await?;
    let wins = run_step(&store, "aggregate_wins", timeout, |s| {
        s.aggregate_transactions(TransactionType::Win)
    })
    .await?;

    let statistics = merge_partials([
        partial(deposits, Statistics::from_deposits),
        partial(bets, |t| Statistics::from_bets(t, mode)),
        partial(wins, Statistics::from_wins),
    ]);

    let state = CacheState::new(accounts, statistics);
    tracing::info!(accounts = state.len(), "Account cache ready");
    Ok(state)
}

impl Ledger {
    /// Bootstrap a state from `store` and build a ledger over it.
    ///
    /// # Errors
    ///
    /// Returns the first bootstrap step that failed.
    pub async fn bootstrap(
        store: Arc<dyn Store>,
        options: BootstrapOptions,
    ) -> Result<Self, BootstrapError> {
        let state = bootstrap(Arc::clone(&store), options).await?;
        Ok(Self::new(store, state, options.bet_sum_mode))
    }
}
