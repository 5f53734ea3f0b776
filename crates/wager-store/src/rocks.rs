//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use wager_core::{
    Account, AccountId, Decimal, DepositRecord, Totals, TransactionRecord, TransactionType,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode every value of a column family.
    fn scan<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let cf = self.cf(name)?;
        let mut values = Vec::new();

        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            values.push(Self::deserialize(&value)?);
        }

        Ok(values)
    }

    /// Write an append-only record, refusing to replace an existing key.
    fn append(
        &self,
        name: &str,
        entity: &'static str,
        id: String,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        let cf = self.cf(name)?;

        let exists = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if exists {
            return Err(StoreError::DuplicateRecord { entity, id });
        }

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Fold one ledger amount into its account's totals.
    fn accumulate(
        totals: &mut HashMap<AccountId, Totals>,
        entity: &'static str,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        totals
            .entry(account_id)
            .or_default()
            .add(amount)
            .map_err(|_| StoreError::Overflow {
                entity,
                account_id: account_id.to_string(),
            })
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.scan(cf::ACCOUNTS)
    }

    fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;

        self.db
            .get_cf(&cf, keys::account_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn insert_accounts(&self, accounts: &[Account]) -> Result<()> {
        if accounts.is_empty() {
            return Ok(());
        }

        let cf = self.cf(cf::ACCOUNTS)?;
        let mut batch = WriteBatch::default();
        for account in accounts {
            batch.put_cf(&cf, keys::account_key(account.id), Self::serialize(account)?);
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(count = accounts.len(), "Inserted accounts");
        Ok(())
    }

    fn update_account(&self, account: &Account) -> Result<()> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(account.id);

        let exists = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if !exists {
            return Err(StoreError::NotFound {
                entity: "account",
                id: account.id.to_string(),
            });
        }

        self.db
            .put_cf(&cf, key, Self::serialize(account)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    fn insert_deposit(&self, record: &DepositRecord) -> Result<()> {
        self.append(
            cf::DEPOSITS,
            "deposit",
            record.id.to_string(),
            &keys::deposit_key(record.id),
            &Self::serialize(record)?,
        )
    }

    fn insert_transaction(&self, record: &TransactionRecord) -> Result<()> {
        self.append(
            cf::TRANSACTIONS,
            "transaction",
            record.id.to_string(),
            &keys::transaction_key(record.id),
            &Self::serialize(record)?,
        )
    }

    // =========================================================================
    // Aggregations
    // =========================================================================

    fn aggregate_deposits(&self) -> Result<HashMap<AccountId, Totals>> {
        let mut totals: HashMap<AccountId, Totals> = HashMap::new();

        for record in self.scan::<DepositRecord>(cf::DEPOSITS)? {
            Self::accumulate(&mut totals, "deposit", record.account_id, record.amount)?;
        }

        Ok(totals)
    }

    fn aggregate_transactions(
        &self,
        transaction_type: TransactionType,
    ) -> Result<HashMap<AccountId, Totals>> {
        let mut totals: HashMap<AccountId, Totals> = HashMap::new();

        for record in self.scan::<TransactionRecord>(cf::TRANSACTIONS)? {
            if record.transaction_type == transaction_type {
                Self::accumulate(&mut totals, "transaction", record.account_id, record.amount)?;
            }
        }

        Ok(totals)
    }
}
