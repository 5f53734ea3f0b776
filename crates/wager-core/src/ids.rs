//! Identifier types for the wager ledger.
//!
//! All identifiers are client-assigned `u64` values. Each gets its own newtype
//! so that an account id can never be passed where a deposit id is expected.
//!
//! # Macro-based ID Types
//!
//! The `numeric_id_type!` macro generates the newtype together with its
//! serialization, parsing, display and key-encoding implementations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Macro to define a `u64`-based identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `u64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as a plain number)
/// - `FromStr`, `Display`, `Debug`
/// - `From<u64>`
///
/// # Example
///
/// ```ignore
/// numeric_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new(7);
/// assert_eq!(MyId::from_be_bytes(id.to_be_bytes()), id);
/// ```
macro_rules! numeric_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new identifier from its raw value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Big-endian bytes, so that storage keys sort numerically.
            #[must_use]
            pub const fn to_be_bytes(self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            /// Rebuild an identifier from its big-endian key bytes.
            #[must_use]
            pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
                Self(u64::from_be_bytes(bytes))
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| ParseError::InvalidId(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id_type!(AccountId, "An account identifier.\n\nAssigned by the caller when the account is created.");
numeric_id_type!(DepositId, "A deposit ledger entry identifier.");
numeric_id_type!(TransactionId, "A bet/win ledger entry identifier.");
