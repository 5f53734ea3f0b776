//! In-memory account state and the mutation engine.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use wager_core::{
    Account, AccountId, AccountStatus, AmountOverflow, BetSumMode, Decimal, DepositId,
    DepositRecord, Statistics, TransactionId, TransactionRecord, TransactionType,
};
use wager_store::Store;

use crate::error::{LedgerError, Result};

/// The cached accounts and their statistics, guarded as one unit.
#[derive(Debug, Default)]
pub struct CacheState {
    accounts: HashMap<AccountId, Account>,
    statistics: HashMap<AccountId, Statistics>,
}

impl CacheState {
    /// Pair accounts with their statistics.
    ///
    /// Every account ends up with exactly one statistics record: accounts
    /// without ledger history get a zeroed one, and statistics for ids with
    /// no account (ledger rows of accounts that were never flushed) are
    /// dropped.
    #[must_use]
    pub fn new(accounts: Vec<Account>, mut statistics: HashMap<AccountId, Statistics>) -> Self {
        let accounts: HashMap<AccountId, Account> =
            accounts.into_iter().map(|a| (a.id, a)).collect();

        statistics.retain(|id, _| {
            let known = accounts.contains_key(id);
            if !known {
                tracing::warn!(account_id = %id, "Dropping statistics for unknown account");
            }
            known
        });
        for id in accounts.keys() {
            statistics.entry(*id).or_default();
        }

        Self {
            accounts,
            statistics,
        }
    }

    /// Number of cached accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the cache holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account and check its token.
    fn authorize(&mut self, id: AccountId, token: &str) -> Result<(&mut Account, &mut Statistics)> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(LedgerError::NotFound { account_id: id })?;
        if !account.token_matches(token) {
            return Err(LedgerError::WrongToken { account_id: id });
        }
        let stats = self.statistics.entry(id).or_default();
        Ok((account, stats))
    }
}

/// Read-only view of an account and its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    /// Account id.
    pub id: AccountId,
    /// Current balance.
    pub balance: Decimal,
    /// Aggregate statistics.
    pub statistics: Statistics,
}

/// Outcome of one flush pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// New accounts inserted.
    pub inserted: usize,
    /// Modified accounts updated.
    pub updated: usize,
    /// Accounts whose persist failed and stay dirty.
    pub failed: usize,
}

impl FlushReport {
    /// Whether the pass persisted anything or hit any failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.updated == 0 && self.failed == 0
    }
}

/// The mutation engine over the cached state.
///
/// Each public method holds the lock for its whole body. Deposits and
/// transactions compute the new balance and statistics first, then append
/// their ledger record, and touch the cache only if the append succeeded.
/// Nothing between the append and the cache update can fail.
pub struct Ledger {
    store: Arc<dyn Store>,
    state: Mutex<CacheState>,
    bet_sum_mode: BetSumMode,
}

impl Ledger {
    /// Create a ledger over an already bootstrapped state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, state: CacheState, bet_sum_mode: BetSumMode) -> Self {
        Self {
            store,
            state: Mutex::new(state),
            bet_sum_mode,
        }
    }

    /// The configured bet-sum mode.
    #[must_use]
    pub fn bet_sum_mode(&self) -> BetSumMode {
        self.bet_sum_mode
    }

    /// Number of cached accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.state.lock().len()
    }

    /// Number of accounts waiting for the flusher.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.state
            .lock()
            .accounts
            .values()
            .filter(|a| a.is_dirty())
            .count()
    }

    /// Get an account and its statistics.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is unknown, `WrongToken` if the token does not
    /// match. `NotFound` wins whatever the token.
    pub fn get_account(&self, id: AccountId, token: &str) -> Result<AccountView> {
        let mut state = self.state.lock();
        let (account, stats) = state.authorize(id, token)?;

        Ok(AccountView {
            id: account.id,
            balance: account.balance,
            statistics: *stats,
        })
    }

    /// Create an account, replacing any cached account with the same id.
    ///
    /// The account starts `New` with zeroed statistics.
    pub fn create_account(&self, id: AccountId, balance: Decimal, token: &str) -> AccountView {
        let mut state = self.state.lock();

        let replaced = state
            .accounts
            .insert(id, Account::new(id, balance, token))
            .is_some();
        state.statistics.insert(id, Statistics::default());

        if replaced {
            tracing::warn!(account_id = %id, "Account re-created, previous state replaced");
        } else {
            tracing::info!(account_id = %id, balance = %balance, "Account created");
        }

        AccountView {
            id,
            balance,
            statistics: Statistics::default(),
        }
    }

    /// Deposit `amount` (non-negative, checked by the caller).
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// `NotFound`, `WrongToken`, `AmountOverflow` if the balance or the
    /// deposit sum would leave the `Decimal` range, or `Persistence` if the
    /// ledger append failed. Nothing changes on any error.
    pub fn deposit(
        &self,
        account_id: AccountId,
        deposit_id: DepositId,
        amount: Decimal,
        token: &str,
    ) -> Result<Decimal> {
        let mut state = self.state.lock();
        let (account, stats) = state.authorize(account_id, token)?;

        let overflow = |_: AmountOverflow| LedgerError::AmountOverflow { account_id };
        let record =
            DepositRecord::new(deposit_id, account_id, amount, account.balance).map_err(overflow)?;
        let next_stats = stats.with_deposit(amount).map_err(overflow)?;

        self.store.insert_deposit(&record)?;

        account.balance = record.balance_after;
        account.mark_modified();
        *stats = next_stats;

        tracing::debug!(
            account_id = %account_id,
            deposit_id = %deposit_id,
            amount = %amount,
            balance = %account.balance,
            "Deposit applied"
        );

        Ok(account.balance)
    }

    /// Apply a bet or a win of `amount` (non-negative, checked by the caller).
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// `NotFound`, `WrongToken`, `InsufficientBalance` for a bet larger than
    /// the balance, `AmountOverflow` if the balance or a statistics sum would
    /// leave the `Decimal` range, or `Persistence` if the ledger append
    /// failed. Nothing changes on any error.
    pub fn transaction(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal,
        token: &str,
    ) -> Result<Decimal> {
        let mut state = self.state.lock();
        let (account, stats) = state.authorize(account_id, token)?;

        if transaction_type == TransactionType::Bet && !account.has_sufficient_balance(amount) {
            return Err(LedgerError::InsufficientBalance {
                balance: account.balance,
                required: amount,
            });
        }

        let overflow = |_: AmountOverflow| LedgerError::AmountOverflow { account_id };
        let record = TransactionRecord::new(
            transaction_id,
            account_id,
            transaction_type,
            amount,
            account.balance,
        )
        .map_err(overflow)?;
        let next_stats = match transaction_type {
            TransactionType::Bet => stats.with_bet(amount, self.bet_sum_mode),
            TransactionType::Win => stats.with_win(amount),
        }
        .map_err(overflow)?;

        self.store.insert_transaction(&record)?;

        account.balance = record.balance_after;
        account.mark_modified();
        *stats = next_stats;

        tracing::debug!(
            account_id = %account_id,
            transaction_id = %transaction_id,
            transaction_type = %transaction_type,
            amount = %amount,
            balance = %account.balance,
            "Transaction applied"
        );

        Ok(account.balance)
    }

    /// Persist every dirty account.
    ///
    /// `New` accounts go out in one batch insert, `Modified` accounts one
    /// update each. Each account that was persisted becomes `Clean`; a
    /// failure is logged and the account stays dirty for the next pass.
    pub fn flush(&self) -> FlushReport {
        let mut state = self.state.lock();
        let mut report = FlushReport::default();

        let new_batch: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| a.status == AccountStatus::New)
            .cloned()
            .collect();

        if !new_batch.is_empty() {
            match self.store.insert_accounts(&new_batch) {
                Ok(()) => {
                    for inserted in &new_batch {
                        if let Some(account) = state.accounts.get_mut(&inserted.id) {
                            account.mark_clean();
                        }
                    }
                    report.inserted = new_batch.len();
                }
                Err(e) => {
                    tracing::warn!(
                        count = new_batch.len(),
                        error = %e,
                        "Failed to insert new accounts, will retry"
                    );
                    report.failed += new_batch.len();
                }
            }
        }

        for account in state
            .accounts
            .values_mut()
            .filter(|a| a.status == AccountStatus::Modified)
        {
            match self.store.update_account(account) {
                Ok(()) => {
                    account.mark_clean();
                    report.updated += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        account_id = %account.id,
                        error = %e,
                        "Failed to update account, will retry"
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }
}
