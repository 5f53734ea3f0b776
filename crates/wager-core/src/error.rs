//! Error types for core parsing.

/// Errors raised when parsing core types from their textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input is not a valid numeric identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The input is not a known transaction type.
    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),

    /// The input is not a known bet-sum mode.
    #[error("unknown bet sum mode: {0}")]
    UnknownBetSumMode(String),
}

/// A balance or statistics sum left the representable `Decimal` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("amount out of range")]
pub struct AmountOverflow;
