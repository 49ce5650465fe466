//! Quill Core - Foundational Ledger Types
//!
//! This crate provides the identifier, time, and asset primitives shared by
//! every Quill crate. It contains only plain data types with deterministic
//! semantics - no I/O, no clocks, no application logic.
//!
//! # Determinism
//!
//! Everything a replicated ledger evaluates must produce the same result on
//! every node. Identifiers are ledger-assigned monotonic instances (never
//! random), and [`Timestamp`] is the ledger's own logical block time, never
//! the wall clock.

#![forbid(unsafe_code)]

/// Account, asset, and custom authority identifiers
pub mod identifiers;

/// Logical block time
pub mod time;

/// Fixed-point asset amounts
pub mod asset;

pub use asset::AssetAmount;
pub use identifiers::{AccountId, AssetId, CustomAuthorityId};
pub use time::Timestamp;
