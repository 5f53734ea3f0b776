//! Common test utilities for wager integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use wager_cache::{BootstrapOptions, Ledger};
use wager_core::{
    Account, AccountId, BetSumMode, DepositRecord, Totals, TransactionRecord, TransactionType,
};
use wager_service::{create_router, AppState, ServiceConfig};
use wager_store::{Result, RocksStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The ledger behind the server.
    pub ledger: Arc<Ledger>,
    /// The store behind the ledger.
    pub store: Arc<dyn Store>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        Self::with_mode(BetSumMode::Gross)
    }

    /// Create a harness whose ledger uses the given bet-sum mode.
    pub fn with_mode(bet_sum_mode: BetSumMode) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store: Arc<dyn Store> =
            Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));
        Self::over(store, temp_dir, bet_sum_mode)
    }

    /// Create a harness over a store whose account inserts can be held open.
    pub fn gated() -> (Self, Arc<GatedStore>) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let gated = Arc::new(GatedStore::open(&temp_dir));
        let store: Arc<dyn Store> = gated.clone();
        (Self::over(store, temp_dir, BetSumMode::Gross), gated)
    }

    fn over(store: Arc<dyn Store>, temp_dir: TempDir, bet_sum_mode: BetSumMode) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            bet_sum_mode,
            ..ServiceConfig::default()
        };

        let ledger = Arc::new(Ledger::new(
            Arc::clone(&store),
            wager_cache::CacheState::default(),
            bet_sum_mode,
        ));

        Self {
            server: server_for(Arc::clone(&ledger), config),
            ledger,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Flush, then rebuild a fresh server from what the store holds.
    pub async fn restart(self) -> Self {
        self.ledger.flush();

        let mode = self.ledger.bet_sum_mode();
        let options = BootstrapOptions {
            bet_sum_mode: mode,
            ..BootstrapOptions::default()
        };
        let ledger = Arc::new(
            Ledger::bootstrap(Arc::clone(&self.store), options)
                .await
                .expect("Failed to bootstrap"),
        );
        let config = ServiceConfig {
            bet_sum_mode: mode,
            ..ServiceConfig::default()
        };

        Self {
            server: server_for(Arc::clone(&ledger), config),
            ledger,
            store: self.store,
            _temp_dir: self._temp_dir,
        }
    }

    /// Create an account through the API.
    pub async fn create_account(&self, id: u64, balance: i64, token: &str) {
        self.server
            .post("/user/create")
            .json(&json!({ "id": id, "balance": balance, "token": token }))
            .await
            .assert_status_ok();
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn server_for(ledger: Arc<Ledger>, config: ServiceConfig) -> TestServer {
    let state = AppState::new(ledger, config);
    let router: Router = create_router(state);
    TestServer::new(router).expect("Failed to create test server")
}

type Gate = (mpsc::Sender<()>, mpsc::Receiver<()>);

/// A `RocksStore` whose next `insert_accounts` can be made to wait.
pub struct GatedStore {
    inner: RocksStore,
    gate: Mutex<Option<Gate>>,
}

impl GatedStore {
    fn open(dir: &TempDir) -> Self {
        Self {
            inner: RocksStore::open(dir.path()).expect("Failed to open store"),
            gate: Mutex::new(None),
        }
    }

    /// Make the next `insert_accounts` signal on the returned receiver, then
    /// wait (at most five seconds) for a message on the returned sender.
    pub fn hold_next_insert(&self) -> (mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        *self.gate.lock().unwrap() = Some((entered_tx, release_rx));
        (entered_rx, release_tx)
    }
}

impl Store for GatedStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.inner.load_accounts()
    }

    fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        self.inner.get_account(id)
    }

    fn insert_accounts(&self, accounts: &[Account]) -> Result<()> {
        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            let _ = entered.send(());
            let _ = release.recv_timeout(Duration::from_secs(5));
        }
        self.inner.insert_accounts(accounts)
    }

    fn update_account(&self, account: &Account) -> Result<()> {
        self.inner.update_account(account)
    }

    fn insert_deposit(&self, record: &DepositRecord) -> Result<()> {
        self.inner.insert_deposit(record)
    }

    fn insert_transaction(&self, record: &TransactionRecord) -> Result<()> {
        self.inner.insert_transaction(record)
    }

    fn aggregate_deposits(&self) -> Result<HashMap<AccountId, Totals>> {
        self.inner.aggregate_deposits()
    }

    fn aggregate_transactions(
        &self,
        transaction_type: TransactionType,
    ) -> Result<HashMap<AccountId, Totals>> {
        self.inner.aggregate_transactions(transaction_type)
    }
}
