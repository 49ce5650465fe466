//! Scalar comparison values
//!
//! A [`Value`] is the unit of comparison in the restriction language: the
//! thing an `Eq` restriction carries, and the thing a field accessor extracts
//! from an operation payload. The set of variants is closed - every layer
//! that consumes values matches exhaustively, so adding a variant is a
//! compile-checked schema change rather than a silent runtime fallback.

use quill_core::{AccountId, AssetAmount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value drawn from the closed set of comparable ledger types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Signed integer of any width, sign-extended
    Int(i64),

    /// Unsigned integer of any width, zero-extended
    UInt(u64),

    /// Boolean flag
    Bool(bool),

    /// UTF-8 string
    String(String),

    /// Fixed-point asset amount
    Amount(AssetAmount),

    /// Account identifier
    Account(AccountId),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Amount(_) => "asset-amount",
            Value::Account(_) => "account",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Amount(v) => write!(f, "{v}"),
            Value::Account(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<AssetAmount> for Value {
    fn from(v: AssetAmount) -> Self {
        Value::Amount(v)
    }
}

impl From<AccountId> for Value {
    fn from(v: AccountId) -> Self {
        Value::Account(v)
    }
}
