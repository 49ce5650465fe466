//! Operation kinds, payloads, and transactions
//!
//! Every operation the ledger understands has a fixed, statically-known
//! payload shape and a stable integer tag. Custom authorities are scoped to
//! exactly one tag; an unknown tag is rejected when the authority is created,
//! never during evaluation.

use crate::restrictions::Restriction;
use quill_core::{AccountId, AssetAmount, AssetId, CustomAuthorityId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The closed set of operation kinds with their stable wire tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum OperationKind {
    /// Move an asset amount between accounts
    Transfer = 0,
    /// Register a new account
    AccountCreate = 5,
    /// Change an account's keys or metadata
    AccountUpdate = 6,
    /// Define a new asset
    AssetCreate = 10,
    /// Change an asset's issuer or options
    AssetUpdate = 11,
    /// Assert predicates against live ledger state
    Assert = 36,
    /// Install a custom authority
    CustomAuthorityCreate = 54,
    /// Mutate an installed custom authority
    CustomAuthorityUpdate = 55,
    /// Remove an installed custom authority
    CustomAuthorityDelete = 56,
}

impl OperationKind {
    /// The stable wire tag of this kind
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// Operation name as it appears in error messages and schemas
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Transfer => "transfer",
            OperationKind::AccountCreate => "account_create",
            OperationKind::AccountUpdate => "account_update",
            OperationKind::AssetCreate => "asset_create",
            OperationKind::AssetUpdate => "asset_update",
            OperationKind::Assert => "assert",
            OperationKind::CustomAuthorityCreate => "custom_authority_create",
            OperationKind::CustomAuthorityUpdate => "custom_authority_update",
            OperationKind::CustomAuthorityDelete => "custom_authority_delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raised when a raw wire tag names no known operation schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation tag {tag}")]
pub struct UnknownOperationTag {
    /// The unrecognized tag
    pub tag: u16,
}

impl TryFrom<u16> for OperationKind {
    type Error = UnknownOperationTag;

    fn try_from(tag: u16) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(OperationKind::Transfer),
            5 => Ok(OperationKind::AccountCreate),
            6 => Ok(OperationKind::AccountUpdate),
            10 => Ok(OperationKind::AssetCreate),
            11 => Ok(OperationKind::AssetUpdate),
            36 => Ok(OperationKind::Assert),
            54 => Ok(OperationKind::CustomAuthorityCreate),
            55 => Ok(OperationKind::CustomAuthorityUpdate),
            56 => Ok(OperationKind::CustomAuthorityDelete),
            tag => Err(UnknownOperationTag { tag }),
        }
    }
}

/// Move an asset amount between accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    /// Paying account
    pub from: AccountId,
    /// Receiving account
    pub to: AccountId,
    /// Amount to move
    pub amount: AssetAmount,
}

/// Register a new account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    /// Account paying the registration
    pub registrar: AccountId,
    /// Referring account
    pub referrer: AccountId,
    /// Share of fees the referrer receives, in basis points
    pub referrer_percent: u16,
    /// Name of the new account
    pub name: String,
}

/// An account's active signing arrangement
///
/// Installing a new one invalidates the assumptions behind the account's
/// custom authorities, so applying an update that carries one disables them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAuthority {
    /// Combined weight needed to authorize
    pub weight_threshold: u32,
    /// Accounts that may sign, with their weights
    pub account_auths: Vec<(AccountId, u16)>,
}

/// Change an account's keys or metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    /// Account being updated
    pub account: AccountId,
    /// Replacement active authority, if changing
    pub new_active: Option<ActiveAuthority>,
}

/// Options shared by all asset definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    /// Maximum issuable supply
    pub max_supply: i64,
    /// Market fee in basis points
    pub market_fee_percent: u16,
    /// Permission flag bits
    pub flags: u16,
}

/// Define a new asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreateOperation {
    /// Issuing account
    pub issuer: AccountId,
    /// Ticker symbol
    pub symbol: String,
    /// Options shared by all asset kinds
    pub common_options: AssetOptions,
}

/// Change an asset's issuer or options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdateOperation {
    /// Current issuer
    pub issuer: AccountId,
    /// Asset being updated
    pub asset_to_update: AssetId,
    /// Replacement issuer, if transferring
    pub new_issuer: Option<AccountId>,
    /// Replacement options, if changing
    pub new_options: Option<AssetOptions>,
}

/// An opaque predicate checked by the assert operation
///
/// The authorization layer cannot compare these, so the `predicates` field is
/// visible to restrictions only as an opaque list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// The named account exists
    AccountExists(String),
    /// The asset's symbol matches
    AssetSymbolEq(AssetId, String),
}

/// Assert predicates against live ledger state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertOperation {
    /// Account paying for the assertion
    pub fee_paying_account: AccountId,
    /// Accounts whose approval the assertion demands
    pub required_auths: Vec<AccountId>,
    /// Predicates that must all hold
    pub predicates: Vec<Predicate>,
}

/// Install a custom authority
///
/// Carries the raw wire tag for the target operation; the tag is resolved and
/// the restrictions are type-checked when the operation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAuthorityCreateOperation {
    /// Account installing the authority (its owner)
    pub account: AccountId,
    /// Whether the authority starts enabled
    pub enabled: bool,
    /// Start of the validity window, inclusive
    pub valid_from: Timestamp,
    /// End of the validity window, inclusive
    pub valid_to: Timestamp,
    /// Raw tag of the one operation kind the authority applies to
    pub operation_type: u16,
    /// Predicates the delegated operation must satisfy
    pub restrictions: Vec<Restriction>,
}

/// Mutate an installed custom authority
///
/// Absent fields leave the stored value untouched. A replacement restriction
/// list is re-validated against the authority's operation type before it is
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAuthorityUpdateOperation {
    /// Owning account; must match the stored authority
    pub account: AccountId,
    /// Authority being updated
    pub authority_to_update: CustomAuthorityId,
    /// Replacement enable flag
    pub new_enabled: Option<bool>,
    /// Replacement window start
    pub new_valid_from: Option<Timestamp>,
    /// Replacement window end
    pub new_valid_to: Option<Timestamp>,
    /// Replacement restriction list
    pub new_restrictions: Option<Vec<Restriction>>,
}

/// Remove an installed custom authority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAuthorityDeleteOperation {
    /// Owning account; must match the stored authority
    pub account: AccountId,
    /// Authority being removed
    pub authority_to_delete: CustomAuthorityId,
}

/// The closed tagged union of all operation payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Transfer payload
    Transfer(TransferOperation),
    /// Account-create payload
    AccountCreate(AccountCreateOperation),
    /// Account-update payload
    AccountUpdate(AccountUpdateOperation),
    /// Asset-create payload
    AssetCreate(AssetCreateOperation),
    /// Asset-update payload
    AssetUpdate(AssetUpdateOperation),
    /// Assert payload
    Assert(AssertOperation),
    /// Custom-authority-create payload
    CustomAuthorityCreate(CustomAuthorityCreateOperation),
    /// Custom-authority-update payload
    CustomAuthorityUpdate(CustomAuthorityUpdateOperation),
    /// Custom-authority-delete payload
    CustomAuthorityDelete(CustomAuthorityDeleteOperation),
}

impl Operation {
    /// The kind (and therefore schema) of this operation
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Transfer(_) => OperationKind::Transfer,
            Operation::AccountCreate(_) => OperationKind::AccountCreate,
            Operation::AccountUpdate(_) => OperationKind::AccountUpdate,
            Operation::AssetCreate(_) => OperationKind::AssetCreate,
            Operation::AssetUpdate(_) => OperationKind::AssetUpdate,
            Operation::Assert(_) => OperationKind::Assert,
            Operation::CustomAuthorityCreate(_) => OperationKind::CustomAuthorityCreate,
            Operation::CustomAuthorityUpdate(_) => OperationKind::CustomAuthorityUpdate,
            Operation::CustomAuthorityDelete(_) => OperationKind::CustomAuthorityDelete,
        }
    }

    /// Accounts whose active/owner authorization this operation structurally
    /// requires
    ///
    /// This is the ledger's static per-operation-kind rule. The verification
    /// orchestrator treats it as a black box.
    pub fn required_authorities(&self) -> BTreeSet<AccountId> {
        let account = match self {
            Operation::Transfer(op) => op.from,
            Operation::AccountCreate(op) => op.registrar,
            Operation::AccountUpdate(op) => op.account,
            Operation::AssetCreate(op) => op.issuer,
            Operation::AssetUpdate(op) => op.issuer,
            Operation::Assert(op) => op.fee_paying_account,
            Operation::CustomAuthorityCreate(op) => op.account,
            Operation::CustomAuthorityUpdate(op) => op.account,
            Operation::CustomAuthorityDelete(op) => op.account,
        };
        BTreeSet::from([account])
    }
}

/// An ordered batch of operations applied atomically
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Operations in application order
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// A transaction containing a single operation
    pub fn single(operation: Operation) -> Self {
        Self {
            operations: vec![operation],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip_for_every_kind() {
        let kinds = [
            OperationKind::Transfer,
            OperationKind::AccountCreate,
            OperationKind::AccountUpdate,
            OperationKind::AssetCreate,
            OperationKind::AssetUpdate,
            OperationKind::Assert,
            OperationKind::CustomAuthorityCreate,
            OperationKind::CustomAuthorityUpdate,
            OperationKind::CustomAuthorityDelete,
        ];
        for kind in kinds {
            assert_eq!(OperationKind::try_from(kind.tag()), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = OperationKind::try_from(999).unwrap_err();
        assert_eq!(err, UnknownOperationTag { tag: 999 });
        assert_eq!(err.to_string(), "unknown operation tag 999");
    }

    #[test]
    fn test_required_authorities_per_kind() {
        let transfer = Operation::Transfer(TransferOperation {
            from: AccountId::new(1),
            to: AccountId::new(2),
            amount: AssetAmount::new(5),
        });
        assert_eq!(
            transfer.required_authorities(),
            BTreeSet::from([AccountId::new(1)])
        );

        let assert_op = Operation::Assert(AssertOperation {
            fee_paying_account: AccountId::new(9),
            ..Default::default()
        });
        assert_eq!(
            assert_op.required_authorities(),
            BTreeSet::from([AccountId::new(9)])
        );
    }

    #[test]
    fn test_operation_kind_matches_variant() {
        let op = Operation::AssetCreate(AssetCreateOperation::default());
        assert_eq!(op.kind(), OperationKind::AssetCreate);
        assert_eq!(op.kind().tag(), 10);
    }
}
