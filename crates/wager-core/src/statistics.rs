//! Per-account aggregate statistics.
//!
//! Statistics are never stored as their own entity. They are kept in lockstep
//! with balance changes while the process runs and re-derived from the ledger
//! at every bootstrap, which runs three independent grouped sums (deposits,
//! bets, wins). Each sum yields a partial record that only fills its own
//! fields; [`merge_partials`] combines them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AmountOverflow, ParseError};
use crate::AccountId;

/// Count and sum of one kind of ledger entry for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Number of entries.
    pub count: u64,
    /// Sum of entry amounts.
    pub sum: Decimal,
}

impl Totals {
    /// Fold one more entry into the totals.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if the sum leaves the `Decimal` range; the totals are
    /// left unchanged.
    pub fn add(&mut self, amount: Decimal) -> Result<(), AmountOverflow> {
        self.sum = self.sum.checked_add(amount).ok_or(AmountOverflow)?;
        self.count += 1;
        Ok(())
    }
}

/// Aggregate counters and sums of an account's deposit, bet and win history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of deposits.
    pub deposit_count: u64,
    /// Sum of deposit amounts.
    pub deposit_sum: Decimal,
    /// Number of bets.
    pub bet_count: u64,
    /// Sum of bet amounts, signed according to the [`BetSumMode`].
    pub bet_sum: Decimal,
    /// Number of wins.
    pub win_count: u64,
    /// Sum of win amounts.
    pub win_sum: Decimal,
}

impl Statistics {
    /// Partial record carrying only deposit fields.
    #[must_use]
    pub fn from_deposits(totals: Totals) -> Self {
        Self {
            deposit_count: totals.count,
            deposit_sum: totals.sum,
            ..Self::default()
        }
    }

    /// Partial record carrying only bet fields.
    ///
    /// `totals.sum` is the gross bet volume read from the ledger.
    #[must_use]
    pub fn from_bets(totals: Totals, mode: BetSumMode) -> Self {
        Self {
            bet_count: totals.count,
            bet_sum: mode.signed(totals.sum),
            ..Self::default()
        }
    }

    /// Partial record carrying only win fields.
    #[must_use]
    pub fn from_wins(totals: Totals) -> Self {
        Self {
            win_count: totals.count,
            win_sum: totals.sum,
            ..Self::default()
        }
    }

    /// Non-destructive field-wise merge.
    ///
    /// Each field of `self` that is still zero takes the value from `other`;
    /// a populated field is never overwritten. The first writer of a field
    /// wins.
    pub fn merge_missing(&mut self, other: &Self) {
        fn fill<T: PartialEq + Default + Copy>(slot: &mut T, value: T) {
            if *slot == T::default() {
                *slot = value;
            }
        }

        fill(&mut self.deposit_count, other.deposit_count);
        fill(&mut self.deposit_sum, other.deposit_sum);
        fill(&mut self.bet_count, other.bet_count);
        fill(&mut self.bet_sum, other.bet_sum);
        fill(&mut self.win_count, other.win_count);
        fill(&mut self.win_sum, other.win_sum);
    }

    /// The statistics after one more deposit.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if `deposit_sum` would leave the `Decimal` range.
    pub fn with_deposit(self, amount: Decimal) -> Result<Self, AmountOverflow> {
        Ok(Self {
            deposit_count: self.deposit_count + 1,
            deposit_sum: self.deposit_sum.checked_add(amount).ok_or(AmountOverflow)?,
            ..self
        })
    }

    /// The statistics after one more bet.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if `bet_sum` would leave the `Decimal` range.
    pub fn with_bet(self, amount: Decimal, mode: BetSumMode) -> Result<Self, AmountOverflow> {
        Ok(Self {
            bet_count: self.bet_count + 1,
            bet_sum: self
                .bet_sum
                .checked_add(mode.signed(amount))
                .ok_or(AmountOverflow)?,
            ..self
        })
    }

    /// The statistics after one more win.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if `win_sum` would leave the `Decimal` range.
    pub fn with_win(self, amount: Decimal) -> Result<Self, AmountOverflow> {
        Ok(Self {
            win_count: self.win_count + 1,
            win_sum: self.win_sum.checked_add(amount).ok_or(AmountOverflow)?,
            ..self
        })
    }
}

/// Merge partial statistics maps in order, field by field.
///
/// Earlier maps take precedence for any field they populate.
#[must_use]
pub fn merge_partials<I>(partials: I) -> HashMap<AccountId, Statistics>
where
    I: IntoIterator<Item = HashMap<AccountId, Statistics>>,
{
    let mut merged: HashMap<AccountId, Statistics> = HashMap::new();
    for partial in partials {
        for (id, stats) in partial {
            merged.entry(id).or_default().merge_missing(&stats);
        }
    }
    merged
}

/// How bets contribute to `bet_sum`.
///
/// Deposits and wins always add their amount. For bets the intended meaning
/// has two readings: the gross volume wagered, or the net effect on the
/// balance. The mode is applied both at runtime and when statistics are
/// re-derived at bootstrap, so the two always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetSumMode {
    /// `bet_sum` grows by the bet amount.
    #[default]
    Gross,
    /// `bet_sum` shrinks by the bet amount, mirroring the balance delta.
    Net,
}

impl BetSumMode {
    /// Sign a bet amount for accumulation into `bet_sum`.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Gross => amount,
            Self::Net => -amount,
        }
    }
}

impl FromStr for BetSumMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gross" => Ok(Self::Gross),
            "net" => Ok(Self::Net),
            _ => Err(ParseError::UnknownBetSumMode(s.to_string())),
        }
    }
}

impl fmt::Display for BetSumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gross => f.write_str("gross"),
            Self::Net => f.write_str("net"),
        }
    }
}
