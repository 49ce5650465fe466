//! Restriction predicates carried by custom authorities
//!
//! A restriction asserts one predicate over one named field of an operation
//! payload (or, for [`Restriction::AttributeAssert`], over a nested
//! sub-object). An authority's top-level restriction list is conjunctive:
//! every restriction must hold for the authority to validate an operation.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single predicate over one named operation field
///
/// The set of kinds is closed. Evaluators and the creation-time type checker
/// match exhaustively on it, so a new kind cannot be added without visiting
/// every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Restriction {
    /// Field equals the value
    Eq {
        /// Name of the target field
        argument: String,
        /// Value the field must equal
        value: Value,
    },

    /// Field does not equal the value
    Neq {
        /// Name of the target field
        argument: String,
        /// Value the field must differ from
        value: Value,
    },

    /// Field equals at least one of the values
    Any {
        /// Name of the target field
        argument: String,
        /// Candidate values
        values: Vec<Value>,
    },

    /// Field equals none of the values
    None {
        /// Name of the target field
        argument: String,
        /// Forbidden values
        values: Vec<Value>,
    },

    /// List field contains every one of the values
    ContainsAll {
        /// Name of the target list field
        argument: String,
        /// Values that must all be present
        values: Vec<Value>,
    },

    /// List field contains none of the values
    ContainsNone {
        /// Name of the target list field
        argument: String,
        /// Values that must all be absent
        values: Vec<Value>,
    },

    /// Field's ordering key is strictly less than the value's
    Lt {
        /// Name of the target field
        argument: String,
        /// Comparison value
        value: Value,
    },

    /// Field's ordering key is less than or equal to the value's
    Le {
        /// Name of the target field
        argument: String,
        /// Comparison value
        value: Value,
    },

    /// Field's ordering key is strictly greater than the value's
    Gt {
        /// Name of the target field
        argument: String,
        /// Comparison value
        value: Value,
    },

    /// Field's ordering key is greater than or equal to the value's
    Ge {
        /// Name of the target field
        argument: String,
        /// Comparison value
        value: Value,
    },

    /// All nested restrictions hold against the named sub-object field
    AttributeAssert {
        /// Name of the sub-object field
        argument: String,
        /// Restrictions evaluated against the sub-object, AND semantics
        restrictions: Vec<Restriction>,
    },
}

/// Discriminant of a [`Restriction`], used in type-compatibility checks and
/// error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// Equality
    Eq,
    /// Inequality
    Neq,
    /// Membership in a value list
    Any,
    /// Non-membership in a value list
    None,
    /// List-field superset of a value list
    ContainsAll,
    /// List-field disjoint from a value list
    ContainsNone,
    /// Strictly less than
    Lt,
    /// Less than or equal
    Le,
    /// Strictly greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Nested sub-object assertion
    AttributeAssert,
}

impl Restriction {
    /// The discriminant of this restriction
    pub fn kind(&self) -> RestrictionKind {
        match self {
            Restriction::Eq { .. } => RestrictionKind::Eq,
            Restriction::Neq { .. } => RestrictionKind::Neq,
            Restriction::Any { .. } => RestrictionKind::Any,
            Restriction::None { .. } => RestrictionKind::None,
            Restriction::ContainsAll { .. } => RestrictionKind::ContainsAll,
            Restriction::ContainsNone { .. } => RestrictionKind::ContainsNone,
            Restriction::Lt { .. } => RestrictionKind::Lt,
            Restriction::Le { .. } => RestrictionKind::Le,
            Restriction::Gt { .. } => RestrictionKind::Gt,
            Restriction::Ge { .. } => RestrictionKind::Ge,
            Restriction::AttributeAssert { .. } => RestrictionKind::AttributeAssert,
        }
    }

    /// Name of the field this restriction targets
    pub fn argument(&self) -> &str {
        match self {
            Restriction::Eq { argument, .. }
            | Restriction::Neq { argument, .. }
            | Restriction::Any { argument, .. }
            | Restriction::None { argument, .. }
            | Restriction::ContainsAll { argument, .. }
            | Restriction::ContainsNone { argument, .. }
            | Restriction::Lt { argument, .. }
            | Restriction::Le { argument, .. }
            | Restriction::Gt { argument, .. }
            | Restriction::Ge { argument, .. }
            | Restriction::AttributeAssert { argument, .. } => argument,
        }
    }

    /// Equality restriction
    pub fn eq(argument: impl Into<String>, value: impl Into<Value>) -> Self {
        Restriction::Eq {
            argument: argument.into(),
            value: value.into(),
        }
    }

    /// Inequality restriction
    pub fn neq(argument: impl Into<String>, value: impl Into<Value>) -> Self {
        Restriction::Neq {
            argument: argument.into(),
            value: value.into(),
        }
    }

    /// Membership restriction
    pub fn any(argument: impl Into<String>, values: Vec<Value>) -> Self {
        Restriction::Any {
            argument: argument.into(),
            values,
        }
    }

    /// Non-membership restriction
    pub fn none(argument: impl Into<String>, values: Vec<Value>) -> Self {
        Restriction::None {
            argument: argument.into(),
            values,
        }
    }

    /// Superset restriction on a list field
    pub fn contains_all(argument: impl Into<String>, values: Vec<Value>) -> Self {
        Restriction::ContainsAll {
            argument: argument.into(),
            values,
        }
    }

    /// Disjointness restriction on a list field
    pub fn contains_none(argument: impl Into<String>, values: Vec<Value>) -> Self {
        Restriction::ContainsNone {
            argument: argument.into(),
            values,
        }
    }

    /// Strict less-than restriction
    pub fn lt(argument: impl Into<String>, value: impl Into<Value>) -> Self {
        Restriction::Lt {
            argument: argument.into(),
            value: value.into(),
        }
    }

    /// Less-than-or-equal restriction
    pub fn le(argument: impl Into<String>, value: impl Into<Value>) -> Self {
        Restriction::Le {
            argument: argument.into(),
            value: value.into(),
        }
    }

    /// Strict greater-than restriction
    pub fn gt(argument: impl Into<String>, value: impl Into<Value>) -> Self {
        Restriction::Gt {
            argument: argument.into(),
            value: value.into(),
        }
    }

    /// Greater-than-or-equal restriction
    pub fn ge(argument: impl Into<String>, value: impl Into<Value>) -> Self {
        Restriction::Ge {
            argument: argument.into(),
            value: value.into(),
        }
    }

    /// Nested sub-object assertion
    pub fn attribute_assert(argument: impl Into<String>, restrictions: Vec<Restriction>) -> Self {
        Restriction::AttributeAssert {
            argument: argument.into(),
            restrictions,
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RestrictionKind::Eq => "eq",
            RestrictionKind::Neq => "neq",
            RestrictionKind::Any => "any",
            RestrictionKind::None => "none",
            RestrictionKind::ContainsAll => "contains-all",
            RestrictionKind::ContainsNone => "contains-none",
            RestrictionKind::Lt => "lt",
            RestrictionKind::Le => "le",
            RestrictionKind::Gt => "gt",
            RestrictionKind::Ge => "ge",
            RestrictionKind::AttributeAssert => "attribute-assert",
        };
        write!(f, "{name}")
    }
}
