//! Quill Ledger - Deterministic Transaction Application
//!
//! The in-memory ledger state the custom-authority engine plugs into: the
//! per-account authority index, the logical head-block clock, the operation
//! evaluators that install/update/remove authorities (and disable them when
//! an account's active authority changes), and the verification orchestrator
//! that decides whether a transaction's required accounts are covered.
//!
//! Everything is synchronous and deterministic. Verification reads committed
//! state plus the candidate transaction and nothing else; mutation happens
//! only through [`Ledger::push_transaction`], after verification succeeds.

#![forbid(unsafe_code)]

/// Operation evaluators
pub mod apply;

/// Ledger-level errors
pub mod errors;

/// The verification orchestrator
pub mod verify;

pub use errors::LedgerError;

use quill_authorization::{AuthorityIndex, CustomAuthority};
use quill_core::{AccountId, Timestamp};

/// In-memory ledger state
///
/// Holds only what the custom-authority engine needs; balances and the rest
/// of the object space live with the surrounding ledger.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    authorities: AuthorityIndex,
    next_authority_id: u64,
    head_block_time: Timestamp,
}

impl Ledger {
    /// An empty ledger at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// The logical clock: the head block's timestamp
    ///
    /// This is the only "now" the engine ever consults, so every node
    /// evaluating the same transaction against the same state reaches the
    /// same verdict.
    pub fn head_block_time(&self) -> Timestamp {
        self.head_block_time
    }

    /// Set the head-block time (called by the surrounding block pipeline)
    pub fn set_head_block_time(&mut self, time: Timestamp) {
        self.head_block_time = time;
    }

    /// Advance the head-block time by whole seconds
    pub fn advance_head_block_time(&mut self, secs: i64) {
        self.head_block_time = self.head_block_time + secs;
    }

    /// All custom authorities owned by an account, in insertion order
    ///
    /// Read-only, no side effects. An empty result is the common state.
    pub fn get_custom_authorities_by_account(&self, account: AccountId) -> Vec<&CustomAuthority> {
        self.authorities.by_account(account)
    }

    pub(crate) fn authorities(&self) -> &AuthorityIndex {
        &self.authorities
    }

    pub(crate) fn authorities_mut(&mut self) -> &mut AuthorityIndex {
        &mut self.authorities
    }

    pub(crate) fn next_authority_id(&self) -> u64 {
        self.next_authority_id
    }

    pub(crate) fn allocate_authority_id(&mut self) -> u64 {
        let id = self.next_authority_id;
        self.next_authority_id += 1;
        id
    }
}
