//! Fixed-point asset amounts

use crate::identifiers::AssetId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a specific asset
///
/// Equality covers both the amount and the asset id; two amounts of different
/// assets are never equal. Ordering is deliberately not derived - relational
/// comparisons go through the authorization layer's coercion rules, which
/// compare the integer amount alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    /// Integer amount in the asset's smallest unit
    pub amount: i64,

    /// The asset this amount denominates
    pub asset_id: AssetId,
}

impl AssetAmount {
    /// An amount of the core asset (asset instance 0)
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            asset_id: AssetId::default(),
        }
    }

    /// An amount of a specific asset
    pub fn with_asset(amount: i64, asset_id: AssetId) -> Self {
        Self { amount, asset_id }
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.amount, self.asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_covers_asset_id() {
        assert_eq!(AssetAmount::new(5), AssetAmount::new(5));
        assert_ne!(AssetAmount::new(5), AssetAmount::new(6));
        assert_ne!(
            AssetAmount::new(5),
            AssetAmount::with_asset(5, AssetId::new(1))
        );
    }
}
