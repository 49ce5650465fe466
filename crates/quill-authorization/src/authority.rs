//! The `CustomAuthority` entity
//!
//! A custom authority is a delegated, conditional permission installed by an
//! account: it applies to exactly one operation kind, inside an inclusive
//! validity window, and only while every one of its restrictions holds
//! against the operation payload.

use crate::errors::RestrictionError;
use crate::evaluation::{evaluate, validate};
use crate::schema::{operation_schema, schema_for, Target};
use quill_core::{AccountId, CustomAuthorityId, Timestamp};
use quill_protocol::{Operation, OperationKind, Restriction};
use serde::{Deserialize, Serialize};

/// A delegated, conditional permission record owned by an account
///
/// Disabled authorities stay on the ledger (they can be re-enabled and they
/// matter for history); they are simply skipped during verification.
///
/// The engine permits `valid_from > valid_to`. Such a window is permanently
/// unsatisfiable but not rejected, matching the behavior authorities were
/// validated against historically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAuthority {
    /// Ledger-assigned identity
    pub id: CustomAuthorityId,

    /// Owning account; only it may update or delete this authority
    pub account: AccountId,

    /// Disabled authorities are inert but retained
    pub enabled: bool,

    /// Start of the validity window, inclusive
    pub valid_from: Timestamp,

    /// End of the validity window, inclusive
    pub valid_to: Timestamp,

    /// The one operation kind this authority applies to
    pub operation_type: OperationKind,

    /// Predicates the delegated operation must satisfy, AND semantics
    pub restrictions: Vec<Restriction>,
}

impl CustomAuthority {
    /// Creation-time structural validation of the restriction list
    ///
    /// Resolves every restriction against the schema named by
    /// `operation_type`. Runs when the authority is created or its
    /// restrictions are replaced - never during verification.
    pub fn validate_restrictions(&self) -> Result<(), RestrictionError> {
        let schema = schema_for(self.operation_type);
        self.restrictions
            .iter()
            .try_for_each(|restriction| validate(restriction, schema))
    }

    /// Does this authority permit `op` at ledger time `now`?
    ///
    /// Short-circuits in order: operation kind, validity window (inclusive on
    /// both ends), then every restriction. An empty restriction list passes
    /// vacuously. Pure; no side effects.
    pub fn validate(&self, op: &Operation, now: Timestamp) -> bool {
        if op.kind() != self.operation_type {
            return false;
        }
        if now < self.valid_from || self.valid_to < now {
            return false;
        }

        let schema = operation_schema(op);
        let target = Target::Operation(op);
        self.restrictions
            .iter()
            .all(|restriction| matches!(evaluate(restriction, schema, &target), Ok(true)))
    }
}
