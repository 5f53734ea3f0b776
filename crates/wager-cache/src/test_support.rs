//! Shared fixtures for the cache tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;
use wager_core::{
    Account, AccountId, BetSumMode, DepositRecord, Totals, TransactionRecord, TransactionType,
};
use wager_store::{Result, RocksStore, Store, StoreError};

use crate::ledger::{CacheState, Ledger};

/// A `RocksStore` with switchable failures and a write counter.
pub struct FlakyStore {
    inner: RocksStore,
    fail_ledger: AtomicBool,
    fail_accounts: AtomicBool,
    fail_aggregates: AtomicBool,
    account_writes: AtomicUsize,
}

impl FlakyStore {
    pub fn open(dir: &TempDir) -> Self {
        Self {
            inner: RocksStore::open(dir.path()).unwrap(),
            fail_ledger: AtomicBool::new(false),
            fail_accounts: AtomicBool::new(false),
            fail_aggregates: AtomicBool::new(false),
            account_writes: AtomicUsize::new(0),
        }
    }

    pub fn fail_ledger(&self, fail: bool) {
        self.fail_ledger.store(fail, Ordering::SeqCst);
    }

    pub fn fail_accounts(&self, fail: bool) {
        self.fail_accounts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_aggregates(&self, fail: bool) {
        self.fail_aggregates.store(fail, Ordering::SeqCst);
    }

    /// Number of account records successfully written so far.
    pub fn account_writes(&self) -> usize {
        self.account_writes.load(Ordering::SeqCst)
    }

    fn check(flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Database("injected failure".into()));
        }
        Ok(())
    }
}

impl Store for FlakyStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        Self::check(&self.fail_accounts)?;
        self.inner.load_accounts()
    }

    fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        self.inner.get_account(id)
    }

    fn insert_accounts(&self, accounts: &[Account]) -> Result<()> {
        Self::check(&self.fail_accounts)?;
        self.inner.insert_accounts(accounts)?;
        self.account_writes.fetch_add(accounts.len(), Ordering::SeqCst);
        Ok(())
    }

    fn update_account(&self, account: &Account) -> Result<()> {
        Self::check(&self.fail_accounts)?;
        self.inner.update_account(account)?;
        self.account_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn insert_deposit(&self, record: &DepositRecord) -> Result<()> {
        Self::check(&self.fail_ledger)?;
        self.inner.insert_deposit(record)
    }

    fn insert_transaction(&self, record: &TransactionRecord) -> Result<()> {
        Self::check(&self.fail_ledger)?;
        self.inner.insert_transaction(record)
    }

    fn aggregate_deposits(&self) -> Result<HashMap<AccountId, Totals>> {
        Self::check(&self.fail_aggregates)?;
        self.inner.aggregate_deposits()
    }

    fn aggregate_transactions(
        &self,
        transaction_type: TransactionType,
    ) -> Result<HashMap<AccountId, Totals>> {
        Self::check(&self.fail_aggregates)?;
        self.inner.aggregate_transactions(transaction_type)
    }
}

/// An empty ledger over a fresh store in a temp dir.
pub fn ledger_with(mode: BetSumMode) -> (Ledger, Arc<FlakyStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FlakyStore::open(&dir));
    let ledger = Ledger::new(store.clone(), CacheState::default(), mode);
    (ledger, store, dir)
}
