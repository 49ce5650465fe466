//! Restriction evaluators
//!
//! Two entry points, one per phase of an authority's life:
//!
//! - [`validate`] runs when an authority is created or updated. It resolves
//!   every restriction's field name against the target schema and checks that
//!   the restriction kind applies to the field's kind. A restriction that
//!   passes here can be evaluated forever after without structural failure.
//! - [`evaluate`] runs during transaction verification. It returns plain
//!   pass/fail; the only error it can produce is a schema mismatch, meaning
//!   the restriction was invoked against a schema it was never validated for.
//!
//! An optional field that is not set passes every restriction kind
//! vacuously: a restriction on an optional field constrains what the field
//! may be set *to*, it does not require the field to be present.

use crate::coercion::{field_ordering_key, ordering_key};
use crate::errors::RestrictionError;
use crate::schema::{FieldKind, FieldValue, Schema, Target};
use quill_protocol::{Restriction, Value};
use std::mem::discriminant;

/// Creation-time structural validation of one restriction against a schema
///
/// Fails on unknown field names, restriction-kind/field-kind mismatches, and
/// relational comparison values with no ordering key. Nested attribute
/// assertions are validated recursively against the sub-object's schema.
pub fn validate(restriction: &Restriction, schema: &'static Schema) -> Result<(), RestrictionError> {
    let spec = schema.resolve(restriction.argument())?;
    let incompatible = || {
        RestrictionError::kind_mismatch(schema.name(), restriction.argument(), restriction.kind())
    };

    match restriction {
        Restriction::Eq { .. } | Restriction::Neq { .. } => match spec.kind {
            FieldKind::Comparable => Ok(()),
            _ => Err(incompatible()),
        },
        Restriction::Any { .. } | Restriction::None { .. } => match spec.kind {
            FieldKind::Comparable => Ok(()),
            _ => Err(incompatible()),
        },
        Restriction::Lt { value, .. }
        | Restriction::Le { value, .. }
        | Restriction::Gt { value, .. }
        | Restriction::Ge { value, .. } => match spec.kind {
            // The comparison value itself must have an ordering key; the
            // field side is guaranteed by its registered kind.
            FieldKind::Comparable => ordering_key(value).map(|_| ()),
            _ => Err(incompatible()),
        },
        Restriction::ContainsAll { .. } | Restriction::ContainsNone { .. } => match spec.kind {
            FieldKind::ComparableList => Ok(()),
            _ => Err(incompatible()),
        },
        Restriction::AttributeAssert { restrictions, .. } => match spec.kind {
            FieldKind::SubObject(nested) => restrictions
                .iter()
                .try_for_each(|nested_restriction| validate(nested_restriction, nested)),
            _ => Err(incompatible()),
        },
    }
}

/// Evaluation-time pass/fail of one previously-validated restriction
///
/// Errors only when the restriction is invoked against a schema it was never
/// validated for; every legitimate outcome is `Ok(true)` or `Ok(false)`.
pub fn evaluate(
    restriction: &Restriction,
    schema: &'static Schema,
    target: &Target<'_>,
) -> Result<bool, RestrictionError> {
    let field = schema.extract(restriction.argument(), target)?;

    // Unset optional: nothing to constrain.
    if field == FieldValue::Absent {
        return Ok(true);
    }

    match restriction {
        Restriction::Eq { value, .. } => Ok(field_equals(&field, value)),
        Restriction::Neq { value, .. } => Ok(field_differs(&field, value)),
        Restriction::Any { values, .. } => {
            Ok(values.iter().any(|value| field_equals(&field, value)))
        }
        Restriction::None { values, .. } => {
            Ok(!values.iter().any(|value| field_equals(&field, value)))
        }
        Restriction::Lt { value, .. } => Ok(compare(&field, value)?.is_lt()),
        Restriction::Le { value, .. } => Ok(compare(&field, value)?.is_le()),
        Restriction::Gt { value, .. } => Ok(compare(&field, value)?.is_gt()),
        Restriction::Ge { value, .. } => Ok(compare(&field, value)?.is_ge()),
        Restriction::ContainsAll { values, .. } => {
            let items = list_items(&field)?;
            Ok(values.iter().all(|value| items.contains(value)))
        }
        Restriction::ContainsNone { values, .. } => {
            let items = list_items(&field)?;
            Ok(!values.iter().any(|value| items.contains(value)))
        }
        Restriction::AttributeAssert { restrictions, .. } => match &field {
            FieldValue::SubObject(sub) => {
                let nested_schema = sub.schema();
                let nested_target = sub.as_target();
                for nested in restrictions {
                    if !evaluate(nested, nested_schema, &nested_target)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Err(RestrictionError::kind_mismatch(
                schema.name(),
                restriction.argument(),
                restriction.kind(),
            )),
        },
    }
}

/// Equality between an extracted field and a comparison value
///
/// Only a scalar field of the same value type can be equal; everything else
/// (lists, sub-objects, cross-type scalars) is not equal.
fn field_equals(field: &FieldValue, value: &Value) -> bool {
    match field {
        FieldValue::Value(held) => held == value,
        _ => false,
    }
}

/// Inequality, failing closed across types
///
/// A field of a different value type than the comparison value is neither
/// equal nor *usefully* unequal: the restriction was installed for a value
/// the field can never hold, so it does not pass.
fn field_differs(field: &FieldValue, value: &Value) -> bool {
    match field {
        FieldValue::Value(held) => discriminant(held) == discriminant(value) && held != value,
        _ => false,
    }
}

fn compare(field: &FieldValue, value: &Value) -> Result<std::cmp::Ordering, RestrictionError> {
    let field_key = field_ordering_key(field)?;
    let value_key = ordering_key(value)?;
    Ok(field_key.cmp(&value_key))
}

fn list_items(field: &FieldValue) -> Result<&[Value], RestrictionError> {
    match field {
        FieldValue::List(items) => Ok(items),
        _ => Err(RestrictionError::uncoercible("non-list field")),
    }
}
