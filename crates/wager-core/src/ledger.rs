//! Ledger entry types.
//!
//! Ledger entries are immutable audit rows. They are written once, before the
//! cached balance changes, and are the source from which statistics are
//! re-derived at bootstrap.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AmountOverflow, ParseError};
use crate::{AccountId, DepositId, TransactionId};

/// An audit record of one deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    /// Deposit id.
    pub id: DepositId,
    /// Account credited.
    pub account_id: AccountId,
    /// Amount deposited.
    pub amount: Decimal,
    /// Balance before the deposit.
    pub balance_before: Decimal,
    /// Balance after the deposit (`balance_before + amount`).
    pub balance_after: Decimal,
    /// When the record was built.
    pub created_at: DateTime<Utc>,
}

impl DepositRecord {
    /// Build the record for a deposit of `amount` onto `balance_before`.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if the resulting balance is not representable.
    pub fn new(
        id: DepositId,
        account_id: AccountId,
        amount: Decimal,
        balance_before: Decimal,
    ) -> Result<Self, AmountOverflow> {
        let balance_after = balance_before.checked_add(amount).ok_or(AmountOverflow)?;

        Ok(Self {
            id,
            account_id,
            amount,
            balance_before,
            balance_after,
            created_at: Utc::now(),
        })
    }
}

/// Kind of a bet/win transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Stake taken from the balance.
    Bet,
    /// Payout added to the balance.
    Win,
}

impl TransactionType {
    /// Balance after applying `amount` of this type to `balance`.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if the result is not representable.
    pub fn apply(self, balance: Decimal, amount: Decimal) -> Result<Decimal, AmountOverflow> {
        match self {
            Self::Bet => balance.checked_sub(amount),
            Self::Win => balance.checked_add(amount),
        }
        .ok_or(AmountOverflow)
    }

    /// Canonical name, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bet => "Bet",
            Self::Win => "Win",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bet" => Ok(Self::Bet),
            "Win" => Ok(Self::Win),
            _ => Err(ParseError::UnknownTransactionType(s.to_string())),
        }
    }
}

/// An audit record of one bet or win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction id.
    pub id: TransactionId,
    /// Account affected.
    pub account_id: AccountId,
    /// Amount staked or paid out. Always non-negative; the type carries the sign.
    pub amount: Decimal,
    /// Bet or win.
    pub transaction_type: TransactionType,
    /// Balance before the transaction.
    pub balance_before: Decimal,
    /// Balance after the transaction.
    pub balance_after: Decimal,
    /// When the record was built.
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Build the record for a transaction of `amount` onto `balance_before`.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if the resulting balance is not representable.
    pub fn new(
        id: TransactionId,
        account_id: AccountId,
        transaction_type: TransactionType,
        amount: Decimal,
        balance_before: Decimal,
    ) -> Result<Self, AmountOverflow> {
        Ok(Self {
            id,
            account_id,
            amount,
            transaction_type,
            balance_before,
            balance_after: transaction_type.apply(balance_before, amount)?,
            created_at: Utc::now(),
        })
    }
}
