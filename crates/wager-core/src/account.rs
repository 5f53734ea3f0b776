//! Account types for the wager ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// A ledger participant: an id, a balance and the bearer token that
/// authorizes operations on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account id.
    pub id: AccountId,

    /// Current balance.
    pub balance: Decimal,

    /// Static bearer token compared on every request.
    pub token: String,

    /// Write-behind status. Cache-only, never persisted; accounts read back
    /// from the store are `Clean`.
    #[serde(skip)]
    pub status: AccountStatus,
}

impl Account {
    /// Create a fresh, never-persisted account.
    #[must_use]
    pub fn new(id: AccountId, balance: Decimal, token: impl Into<String>) -> Self {
        Self {
            id,
            balance,
            token: token.into(),
            status: AccountStatus::New,
        }
    }

    /// Check the presented token against the stored one.
    #[must_use]
    pub fn token_matches(&self, token: &str) -> bool {
        self.token == token
    }

    /// Check if the balance covers a bet of `amount`.
    #[must_use]
    pub fn has_sufficient_balance(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Record that the cached copy now differs from the persisted one.
    ///
    /// A `New` account stays `New`: it has never been inserted, so the next
    /// flush must still insert it rather than update it.
    pub fn mark_modified(&mut self) {
        if self.status != AccountStatus::New {
            self.status = AccountStatus::Modified;
        }
    }

    /// Record that the cached copy matches the persisted one.
    pub fn mark_clean(&mut self) {
        self.status = AccountStatus::Clean;
    }

    /// Whether the flusher has work to do for this account.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.status != AccountStatus::Clean
    }
}

/// Dirty-status of a cached account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Matches the persisted record.
    #[default]
    Clean,

    /// Never persisted; the next flush inserts it.
    New,

    /// Persisted, but changed since; the next flush updates it.
    Modified,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(AccountId::new(1), Decimal::from(100), "secret")
    }

    #[test]
    fn new_account_is_new() {
        let account = account();
        assert_eq!(account.status, AccountStatus::New);
        assert!(account.is_dirty());
    }

    #[test]
    fn new_account_stays_new_when_modified() {
        let mut account = account();
        account.mark_modified();
        assert_eq!(account.status, AccountStatus::New);
    }

    #[test]
    fn clean_account_becomes_modified() {
        let mut account = account();
        account.mark_clean();
        assert!(!account.is_dirty());

        account.mark_modified();
        assert_eq!(account.status, AccountStatus::Modified);
    }

    #[test]
    fn sufficient_balance_is_inclusive() {
        let account = account();
        assert!(account.has_sufficient_balance(Decimal::from(100)));
        assert!(!account.has_sufficient_balance(Decimal::new(10001, 2)));
    }

    #[test]
    fn status_is_not_serialized() {
        let mut account = account();
        account.mark_modified();
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("status").is_none());

        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back.status, AccountStatus::Clean);
    }
}
