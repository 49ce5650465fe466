//! Structural errors raised by the engine
//!
//! These are creation-time failures: a create or update operation carrying a
//! restriction the target schema cannot support is rejected outright, and the
//! transaction containing it is never applied. An authority that merely does
//! not pass during verification is not an error at this layer - evaluators
//! report plain `false` and the orchestrator decides what that means.

use quill_protocol::{RestrictionKind, UnknownOperationTag};

/// A restriction (or the authority carrying it) is structurally invalid for
/// its target schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestrictionError {
    /// The authority names an operation tag no schema is registered for
    #[error("unknown operation tag {tag}")]
    UnknownOperationTag {
        /// The unrecognized tag
        tag: u16,
    },

    /// The restriction's argument names no field of the target schema
    #[error("schema {schema} has no field named {field}")]
    UnknownField {
        /// Schema the restriction was validated against
        schema: &'static str,
        /// The unresolved field name
        field: String,
    },

    /// The restriction kind cannot apply to the field's kind
    #[error("{kind} restriction cannot target field {field} of schema {schema}")]
    KindMismatch {
        /// Schema the restriction was validated against
        schema: &'static str,
        /// The incompatible field
        field: String,
        /// The restriction kind that does not apply
        kind: RestrictionKind,
    },

    /// The value has no defined ordering key
    #[error("no ordering key defined for {type_name} values")]
    Uncoercible {
        /// Variant name of the uncoercible value
        type_name: &'static str,
    },

    /// An accessor was invoked against a schema it was never validated for
    #[error("accessor for schema {expected} invoked against {actual}")]
    SchemaMismatch {
        /// Schema the accessor belongs to
        expected: &'static str,
        /// Schema of the target actually supplied
        actual: &'static str,
    },
}

impl RestrictionError {
    /// Unknown-field constructor
    pub fn unknown_field(schema: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            schema,
            field: field.into(),
        }
    }

    /// Kind-mismatch constructor
    pub fn kind_mismatch(
        schema: &'static str,
        field: impl Into<String>,
        kind: RestrictionKind,
    ) -> Self {
        Self::KindMismatch {
            schema,
            field: field.into(),
            kind,
        }
    }

    /// Uncoercible-value constructor
    pub fn uncoercible(type_name: &'static str) -> Self {
        Self::Uncoercible { type_name }
    }

    /// Schema-mismatch constructor
    pub fn schema_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::SchemaMismatch { expected, actual }
    }
}

impl From<UnknownOperationTag> for RestrictionError {
    fn from(err: UnknownOperationTag) -> Self {
        Self::UnknownOperationTag { tag: err.tag }
    }
}
