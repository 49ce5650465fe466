//! Core identifier types used across the Quill ledger
//!
//! Identifiers are ledger-assigned monotonic instance numbers. They are never
//! derived from randomness so that every replica assigns identical ids when
//! applying the same operation stream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier
///
/// Uniquely identifies an account object on the ledger. Accounts own custom
/// authorities and are the unit of authorization during verification.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Create from a raw instance number
    pub fn new(instance: u64) -> Self {
        Self(instance)
    }

    /// Get the raw instance number
    pub fn instance(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account-{}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(instance: u64) -> Self {
        Self(instance)
    }
}

/// Asset identifier
///
/// Identifies an asset definition; amount values carry one so that amounts of
/// different assets never compare equal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AssetId(pub u64);

impl AssetId {
    /// Create from a raw instance number
    pub fn new(instance: u64) -> Self {
        Self(instance)
    }

    /// Get the raw instance number
    pub fn instance(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset-{}", self.0)
    }
}

impl From<u64> for AssetId {
    fn from(instance: u64) -> Self {
        Self(instance)
    }
}

/// Custom authority identifier
///
/// Assigned by the ledger when a create-authority operation is applied.
/// Monotonic within a ledger, so iterating an account's authorities in id
/// order reproduces insertion order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CustomAuthorityId(pub u64);

impl CustomAuthorityId {
    /// Create from a raw instance number
    pub fn new(instance: u64) -> Self {
        Self(instance)
    }

    /// Get the raw instance number
    pub fn instance(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomAuthorityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "custom-authority-{}", self.0)
    }
}

impl From<u64> for CustomAuthorityId {
    fn from(instance: u64) -> Self {
        Self(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        assert_eq!(AccountId::new(7).to_string(), "account-7");
        assert_eq!(AssetId::new(3).to_string(), "asset-3");
        assert_eq!(CustomAuthorityId::new(0).to_string(), "custom-authority-0");
    }

    #[test]
    fn test_identifier_ordering_follows_instance() {
        assert!(AccountId::new(1) < AccountId::new(2));
        assert!(CustomAuthorityId::new(10) > CustomAuthorityId::new(9));
    }

    #[test]
    fn test_identifier_serde_round_trip() {
        let id = AccountId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
