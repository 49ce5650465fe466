//! Quill Protocol - Operation Schemas and Restrictions
//!
//! The statically-known data model of the ledger: the closed set of operation
//! kinds with stable integer tags, the per-operation payload structs, the
//! restriction predicate language installed by custom authorities, and the
//! transaction envelope.
//!
//! This crate holds data shapes only. How a restriction is validated against
//! an operation schema and how its predicates are evaluated lives in
//! `quill-authorization`; how operations mutate ledger state lives in
//! `quill-ledger`.

#![forbid(unsafe_code)]

/// Operation kinds, payloads, and transactions
pub mod operations;

/// Restriction predicates carried by custom authorities
pub mod restrictions;

/// Scalar comparison values
pub mod value;

pub use operations::{
    AccountCreateOperation, AccountUpdateOperation, ActiveAuthority, AssertOperation,
    AssetCreateOperation, AssetOptions, AssetUpdateOperation, CustomAuthorityCreateOperation,
    CustomAuthorityDeleteOperation, CustomAuthorityUpdateOperation, Operation, OperationKind,
    Predicate, Transaction, TransferOperation, UnknownOperationTag,
};
pub use restrictions::{Restriction, RestrictionKind};
pub use value::Value;
