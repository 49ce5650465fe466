//! Quill Authorization - Custom Authority Policy Engine
//!
//! Account owners may install *custom authorities*: delegated, conditional
//! permissions that let a third party act on their behalf for exactly one
//! operation kind, inside a validity window, and only when every installed
//! restriction holds against the operation's payload.
//!
//! # Layers
//!
//! Bottom-up:
//!
//! - [`coercion`] - the canonical signed 64-bit ordering key every relational
//!   restriction compares through. The coercible set is closed and
//!   deliberately surprising (strings map to their length); see the module
//!   docs before "fixing" it.
//! - [`schema`] - one accessor registry per operation kind, built once. Field
//!   names resolve to typed extraction functions; unknown names and
//!   kind-mismatched restrictions are rejected when an authority is created,
//!   never while a transaction is being verified.
//! - [`evaluation`] - the restriction evaluators: creation-time structural
//!   validation and evaluation-time pass/fail for every restriction kind.
//! - [`authority`] - the [`CustomAuthority`] entity and its validation
//!   algorithm.
//! - [`index`] - the per-account, insertion-ordered [`AuthorityIndex`].
//!
//! Everything here is pure and synchronous. "Now" is always the ledger's
//! logical head-block time supplied by the caller, so every replica reaches
//! the same verdict.

#![forbid(unsafe_code)]

/// The `CustomAuthority` entity
pub mod authority;

/// Ordering-key coercion for relational restrictions
pub mod coercion;

/// Structural errors raised by the engine
pub mod errors;

/// Restriction evaluators
pub mod evaluation;

/// Per-account authority index
pub mod index;

/// Field accessor registries for the operation schemas
pub mod schema;

pub use authority::CustomAuthority;
pub use coercion::{field_ordering_key, ordering_key};
pub use errors::RestrictionError;
pub use evaluation::{evaluate, validate};
pub use index::AuthorityIndex;
pub use schema::{operation_schema, schema_for, FieldKind, FieldSpec, FieldValue, Schema, Target};
