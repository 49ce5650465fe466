//! Ordering-key coercion for relational restrictions
//!
//! Relational restrictions (`Lt`/`Le`/`Gt`/`Ge`) compare heterogeneous field
//! values through one canonical signed 64-bit ordering key. The mapping is
//! exhaustive over a closed set and intentionally surprising in places:
//! strings compare by their *length* and collections by their *element
//! count*. These mappings are load-bearing compatibility behavior - an
//! authority's semantics must match exactly what was validated when it was
//! created - so they must not be "fixed" to something more intuitive.
//!
//! There is no fallback branch. A value outside the coercible set fails with
//! [`RestrictionError::Uncoercible`]; extending the set is a deliberate
//! schema change.

use crate::errors::RestrictionError;
use crate::schema::FieldValue;
use quill_protocol::Value;

/// Canonical ordering key of a scalar value
///
/// - `Int` is taken as-is; `UInt` is cast two's-complement to `i64`.
/// - `String` maps to its length in bytes.
/// - `Amount` maps to its integer amount, ignoring the asset id.
/// - `Account` maps to its instance number.
/// - `Bool` has no defined ordering and fails.
pub fn ordering_key(value: &Value) -> Result<i64, RestrictionError> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::UInt(v) => Ok(*v as i64),
        Value::String(v) => Ok(v.len() as i64),
        Value::Amount(v) => Ok(v.amount),
        Value::Account(v) => Ok(v.instance() as i64),
        Value::Bool(_) => Err(RestrictionError::uncoercible(value.type_name())),
    }
}

/// Canonical ordering key of an extracted field value
///
/// Extends [`ordering_key`] with the list mapping: a list field compares by
/// its element count. Sub-objects, opaque fields, and absent optionals have
/// no ordering key; absent optionals never reach this point because every
/// restriction kind passes vacuously on them.
pub fn field_ordering_key(field: &FieldValue) -> Result<i64, RestrictionError> {
    match field {
        FieldValue::Value(value) => ordering_key(value),
        FieldValue::List(items) => Ok(items.len() as i64),
        FieldValue::SubObject(_) => Err(RestrictionError::uncoercible("sub-object")),
        FieldValue::Opaque => Err(RestrictionError::uncoercible("opaque")),
        FieldValue::Absent => Err(RestrictionError::uncoercible("absent optional")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use quill_core::{AccountId, AssetAmount, AssetId};

    #[test]
    fn test_integers_coerce_to_themselves() {
        assert_eq!(ordering_key(&Value::Int(4)).unwrap(), 4);
        assert_eq!(ordering_key(&Value::Int(-4)).unwrap(), -4);
        assert_eq!(ordering_key(&Value::UInt(4)).unwrap(), 4);
        assert_eq!(ordering_key(&Value::Int(i64::MIN)).unwrap(), i64::MIN);
    }

    #[test]
    fn test_uint_coerces_twos_complement() {
        assert_eq!(ordering_key(&Value::UInt(u64::MAX)).unwrap(), -1);
    }

    #[test]
    fn test_strings_coerce_to_length() {
        assert_eq!(ordering_key(&Value::from("")).unwrap(), 0);
        assert_eq!(ordering_key(&Value::from("1")).unwrap(), 1);
        assert_eq!(ordering_key(&Value::from("22")).unwrap(), 2);
        assert_eq!(ordering_key(&Value::from("333")).unwrap(), 3);
    }

    #[test]
    fn test_amounts_coerce_to_amount_ignoring_asset() {
        assert_eq!(ordering_key(&Value::Amount(AssetAmount::new(5))).unwrap(), 5);
        assert_eq!(
            ordering_key(&Value::Amount(AssetAmount::with_asset(7, AssetId::new(3)))).unwrap(),
            7
        );
    }

    #[test]
    fn test_accounts_coerce_to_instance() {
        assert_eq!(ordering_key(&Value::Account(AccountId::new(12))).unwrap(), 12);
    }

    #[test]
    fn test_bool_has_no_ordering() {
        assert_matches!(
            ordering_key(&Value::Bool(true)),
            Err(RestrictionError::Uncoercible { type_name: "bool" })
        );
    }

    #[test]
    fn test_lists_coerce_to_element_count() {
        let field = FieldValue::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(field_ordering_key(&field).unwrap(), 3);
        assert_eq!(field_ordering_key(&FieldValue::List(vec![])).unwrap(), 0);
    }

    #[test]
    fn test_sub_objects_and_absent_have_no_ordering() {
        assert_matches!(
            field_ordering_key(&FieldValue::Absent),
            Err(RestrictionError::Uncoercible { .. })
        );
        assert_matches!(
            field_ordering_key(&FieldValue::Opaque),
            Err(RestrictionError::Uncoercible { .. })
        );
    }
}
