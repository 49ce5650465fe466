//! Restriction evaluator coverage: one test per predicate-kind behavior,
//! plus creation-time structural validation and complement properties.

use assert_matches::assert_matches;
use proptest::prelude::*;
use quill_authorization::{evaluate, operation_schema, schema_for, validate, RestrictionError, Target};
use quill_core::{AccountId, AssetAmount};
use quill_protocol::{
    AccountCreateOperation, AssertOperation, AssetCreateOperation, AssetOptions,
    AssetUpdateOperation, Operation, OperationKind, Restriction, Value,
};

fn passes(restriction: &Restriction, op: &Operation) -> bool {
    evaluate(restriction, operation_schema(op), &Target::Operation(op)).unwrap()
}

fn transfer_of(amount: i64) -> Operation {
    Operation::Transfer(quill_protocol::TransferOperation {
        from: AccountId::new(1),
        to: AccountId::new(2),
        amount: AssetAmount::new(amount),
    })
}

fn account_create_with_referrer_percent(percent: u16) -> Operation {
    Operation::AccountCreate(AccountCreateOperation {
        referrer_percent: percent,
        ..Default::default()
    })
}

fn assert_with_auths(auths: &[u64]) -> Operation {
    Operation::Assert(AssertOperation {
        required_auths: auths.iter().map(|i| AccountId::new(*i)).collect(),
        ..Default::default()
    })
}

fn accounts(ids: &[u64]) -> Vec<Value> {
    ids.iter().map(|i| Value::Account(AccountId::new(*i))).collect()
}

// === eq / neq ===

#[test]
fn eq_passes_when_amounts_are_equal() {
    assert!(passes(&Restriction::eq("amount", AssetAmount::new(5)), &transfer_of(5)));
}

#[test]
fn eq_fails_when_amounts_differ() {
    assert!(!passes(&Restriction::eq("amount", AssetAmount::new(6)), &transfer_of(5)));
}

#[test]
fn eq_fails_when_comparing_amount_field_against_account_value() {
    assert!(!passes(&Restriction::eq("amount", AccountId::new(1)), &transfer_of(5)));
}

#[test]
fn neq_passes_when_amounts_differ() {
    assert!(passes(&Restriction::neq("amount", AssetAmount::new(6)), &transfer_of(5)));
}

#[test]
fn neq_fails_when_amounts_are_equal() {
    assert!(!passes(&Restriction::neq("amount", AssetAmount::new(5)), &transfer_of(5)));
}

#[test]
fn neq_fails_closed_when_comparing_different_types() {
    assert!(!passes(&Restriction::neq("amount", AccountId::new(1)), &transfer_of(5)));
}

// === any / none ===

#[test]
fn any_passes_when_value_present_in_single_element_list() {
    let rest = Restriction::any("amount", vec![Value::Amount(AssetAmount::new(5))]);
    assert!(passes(&rest, &transfer_of(5)));
}

#[test]
fn any_passes_when_value_present_among_several() {
    let rest = Restriction::any(
        "amount",
        vec![
            Value::Amount(AssetAmount::new(1)),
            Value::Amount(AssetAmount::new(2)),
            Value::Amount(AssetAmount::new(5)),
        ],
    );
    assert!(passes(&rest, &transfer_of(5)));
}

#[test]
fn any_fails_when_value_not_present() {
    let rest = Restriction::any(
        "amount",
        vec![
            Value::Amount(AssetAmount::new(1)),
            Value::Amount(AssetAmount::new(2)),
            Value::Amount(AssetAmount::new(3)),
        ],
    );
    assert!(!passes(&rest, &transfer_of(5)));
}

#[test]
fn none_passes_against_empty_list() {
    let rest = Restriction::none("amount", vec![]);
    assert!(passes(&rest, &transfer_of(4)));
}

#[test]
fn none_passes_when_value_not_present() {
    let rest = Restriction::none(
        "amount",
        vec![Value::Amount(AssetAmount::new(1)), Value::Amount(AssetAmount::new(2))],
    );
    assert!(passes(&rest, &transfer_of(4)));
}

#[test]
fn none_fails_when_value_present() {
    let rest = Restriction::none(
        "amount",
        vec![
            Value::Amount(AssetAmount::new(1)),
            Value::Amount(AssetAmount::new(2)),
            Value::Amount(AssetAmount::new(3)),
        ],
    );
    assert!(!passes(&rest, &transfer_of(2)));
}

// === contains_all / contains_none ===

#[test]
fn contains_all_passes_when_list_field_equals_values() {
    let op = assert_with_auths(&[1, 2, 3]);
    assert!(passes(&Restriction::contains_all("required_auths", accounts(&[1, 2, 3])), &op));
}

#[test]
fn contains_all_fails_when_list_field_is_proper_subset() {
    let op = assert_with_auths(&[1, 2, 3]);
    let rest = Restriction::contains_all("required_auths", accounts(&[0, 1, 2, 3, 4]));
    assert!(!passes(&rest, &op));
}

#[test]
fn contains_all_passes_when_list_field_is_superset() {
    let op = assert_with_auths(&[0, 1, 2, 3, 4]);
    assert!(passes(&Restriction::contains_all("required_auths", accounts(&[1, 2, 3])), &op));
}

#[test]
fn contains_none_passes_when_disjoint() {
    let op = assert_with_auths(&[0, 1, 2]);
    assert!(passes(&Restriction::contains_none("required_auths", accounts(&[3, 4])), &op));
}

#[test]
fn contains_none_fails_when_one_value_present() {
    let op = assert_with_auths(&[0, 1, 2]);
    assert!(!passes(&Restriction::contains_none("required_auths", accounts(&[1])), &op));
}

#[test]
fn contains_none_fails_when_several_values_present() {
    let op = assert_with_auths(&[0, 1, 2]);
    assert!(!passes(&Restriction::contains_none("required_auths", accounts(&[1, 2])), &op));
}

#[test]
fn singleton_contains_kinds_are_exact_complements() {
    // For a single candidate value, contains_all and contains_none are
    // membership and its negation.
    for present in [0u64, 1, 2, 9] {
        let op = assert_with_auths(&[0, 1, 2]);
        let all = Restriction::contains_all("required_auths", accounts(&[present]));
        let none = Restriction::contains_none("required_auths", accounts(&[present]));
        assert_ne!(passes(&all, &op), passes(&none, &op));
    }
}

// === relational kinds (ordering keys) ===

#[test]
fn lt_passes_below_fails_at_and_above_value() {
    let rest = Restriction::lt("referrer_percent", 60u16);
    assert!(passes(&rest, &account_create_with_referrer_percent(50)));

    let rest = Restriction::lt("referrer_percent", 50u16);
    assert!(!passes(&rest, &account_create_with_referrer_percent(50)));
    assert!(!passes(&rest, &account_create_with_referrer_percent(60)));
}

#[test]
fn le_passes_at_boundary() {
    let rest = Restriction::le("referrer_percent", 50u16);
    assert!(passes(&rest, &account_create_with_referrer_percent(50)));
    assert!(passes(&rest, &account_create_with_referrer_percent(40)));
    assert!(!passes(&rest, &account_create_with_referrer_percent(60)));
}

#[test]
fn gt_passes_above_fails_at_and_below_value() {
    let rest = Restriction::gt("referrer_percent", 50u16);
    assert!(passes(&rest, &account_create_with_referrer_percent(60)));
    assert!(!passes(&rest, &account_create_with_referrer_percent(50)));
    assert!(!passes(&rest, &account_create_with_referrer_percent(40)));
}

#[test]
fn ge_passes_at_boundary() {
    let rest = Restriction::ge("referrer_percent", 50u16);
    assert!(passes(&rest, &account_create_with_referrer_percent(50)));
    assert!(passes(&rest, &account_create_with_referrer_percent(60)));
    assert!(!passes(&rest, &account_create_with_referrer_percent(40)));
}

#[test]
fn relational_kinds_compare_strings_by_length() {
    let op = Operation::AccountCreate(AccountCreateOperation {
        name: "alice".to_string(),
        ..Default::default()
    });
    assert!(passes(&Restriction::lt("name", "twelve chars"), &op));
    assert!(passes(&Restriction::ge("name", "12345"), &op));
    assert!(!passes(&Restriction::gt("name", "12345"), &op));
}

#[test]
fn relational_kinds_compare_lists_by_element_count() {
    let op = assert_with_auths(&[1, 2, 3]);
    // A three-element list field keys to 3.
    assert!(passes(&Restriction::ge("required_auths", 3u64), &op));
    assert!(!passes(&Restriction::gt("required_auths", 3u64), &op));
}

// === optional fields ===

#[test]
fn restriction_on_unset_optional_passes_vacuously() {
    let op = Operation::AssetUpdate(AssetUpdateOperation::default());
    assert!(passes(&Restriction::eq("new_issuer", AccountId::new(1)), &op));
    assert!(passes(&Restriction::neq("new_issuer", AccountId::new(1)), &op));
}

#[test]
fn restriction_on_set_optional_is_enforced() {
    let op = Operation::AssetUpdate(AssetUpdateOperation {
        new_issuer: Some(AccountId::new(1)),
        ..Default::default()
    });
    assert!(passes(&Restriction::eq("new_issuer", AccountId::new(1)), &op));

    let op = Operation::AssetUpdate(AssetUpdateOperation {
        new_issuer: Some(AccountId::new(2)),
        ..Default::default()
    });
    assert!(!passes(&Restriction::eq("new_issuer", AccountId::new(1)), &op));
}

// === attribute_assert ===

fn asset_create_with_options(options: AssetOptions) -> Operation {
    Operation::AssetCreate(AssetCreateOperation {
        common_options: options,
        ..Default::default()
    })
}

#[test]
fn attribute_assert_passes_without_sub_restrictions() {
    let op = asset_create_with_options(AssetOptions::default());
    assert!(passes(&Restriction::attribute_assert("common_options", vec![]), &op));
}

#[test]
fn attribute_assert_passes_when_all_sub_restrictions_pass() {
    let op = asset_create_with_options(AssetOptions {
        market_fee_percent: 100,
        ..Default::default()
    });
    let rest = Restriction::attribute_assert(
        "common_options",
        vec![
            Restriction::eq("market_fee_percent", 100u16),
            Restriction::neq("market_fee_percent", 200u16),
        ],
    );
    assert!(passes(&rest, &op));
}

#[test]
fn attribute_assert_fails_when_one_sub_restriction_fails() {
    let op = asset_create_with_options(AssetOptions {
        market_fee_percent: 100,
        flags: 1,
        ..Default::default()
    });
    let rest = Restriction::attribute_assert(
        "common_options",
        vec![
            Restriction::eq("market_fee_percent", 100u16),
            Restriction::eq("flags", 2u16),
        ],
    );
    assert!(!passes(&rest, &op));
}

#[test]
fn attribute_assert_fails_when_single_sub_restriction_fails() {
    let op = asset_create_with_options(AssetOptions {
        market_fee_percent: 101,
        ..Default::default()
    });
    let rest = Restriction::attribute_assert(
        "common_options",
        vec![Restriction::eq("market_fee_percent", 100u16)],
    );
    assert!(!passes(&rest, &op));
}

#[test]
fn attribute_assert_on_unset_optional_sub_object_passes_vacuously() {
    let op = Operation::AssetUpdate(AssetUpdateOperation::default());
    let rest = Restriction::attribute_assert(
        "new_options",
        vec![Restriction::eq("flags", 1u16)],
    );
    assert!(passes(&rest, &op));
}

// === creation-time structural validation ===

#[test]
fn validate_accepts_eq_on_amount_field() {
    let rest = Restriction::eq("amount", AssetAmount::new(5));
    assert!(validate(&rest, schema_for(OperationKind::Transfer)).is_ok());
}

#[test]
fn validate_rejects_unknown_field_name() {
    let rest = Restriction::eq("amount1", AssetAmount::new(5));
    assert_matches!(
        validate(&rest, schema_for(OperationKind::Transfer)),
        Err(RestrictionError::UnknownField { schema: "transfer", .. })
    );
}

#[test]
fn validate_rejects_eq_on_sub_object_field() {
    let rest = Restriction::eq("new_options", AssetAmount::new(5));
    assert_matches!(
        validate(&rest, schema_for(OperationKind::AssetUpdate)),
        Err(RestrictionError::KindMismatch { .. })
    );
}

#[test]
fn validate_accepts_contains_all_on_list_field() {
    let rest = Restriction::contains_all("required_auths", accounts(&[1]));
    assert!(validate(&rest, schema_for(OperationKind::Assert)).is_ok());
}

#[test]
fn validate_rejects_contains_all_on_scalar_field() {
    let rest = Restriction::contains_all("amount", accounts(&[1]));
    assert_matches!(
        validate(&rest, schema_for(OperationKind::Transfer)),
        Err(RestrictionError::KindMismatch { .. })
    );
}

#[test]
fn validate_rejects_contains_all_on_opaque_list_field() {
    let rest = Restriction::contains_all("predicates", accounts(&[1]));
    assert_matches!(
        validate(&rest, schema_for(OperationKind::Assert)),
        Err(RestrictionError::KindMismatch { .. })
    );
}

#[test]
fn validate_recurses_into_attribute_assert() {
    let good = Restriction::attribute_assert(
        "common_options",
        vec![
            Restriction::eq("market_fee_percent", 100u16),
            Restriction::eq("market_fee_percent", 101u16),
        ],
    );
    assert!(validate(&good, schema_for(OperationKind::AssetCreate)).is_ok());

    // contains_all on a scalar nested field must be rejected.
    let bad = Restriction::attribute_assert(
        "common_options",
        vec![Restriction::contains_all("market_fee_percent", vec![])],
    );
    assert_matches!(
        validate(&bad, schema_for(OperationKind::AssetCreate)),
        Err(RestrictionError::KindMismatch { .. })
    );

    // One valid sibling does not rescue an invalid one.
    let mixed = Restriction::attribute_assert(
        "common_options",
        vec![
            Restriction::contains_all("market_fee_percent", vec![]),
            Restriction::eq("market_fee_percent", 101u16),
        ],
    );
    assert!(validate(&mixed, schema_for(OperationKind::AssetCreate)).is_err());
}

#[test]
fn validate_rejects_attribute_assert_on_scalar_field() {
    let rest = Restriction::attribute_assert("amount", vec![]);
    assert_matches!(
        validate(&rest, schema_for(OperationKind::Transfer)),
        Err(RestrictionError::KindMismatch { .. })
    );
}

// === complement properties ===

proptest! {
    #[test]
    fn any_and_none_are_exact_complements(
        amount in -1000i64..1000,
        candidates in proptest::collection::vec(-1000i64..1000, 0..8),
    ) {
        let op = transfer_of(amount);
        let values: Vec<Value> = candidates
            .into_iter()
            .map(|a| Value::Amount(AssetAmount::new(a)))
            .collect();
        let any = Restriction::any("amount", values.clone());
        let none = Restriction::none("amount", values);
        prop_assert_ne!(passes(&any, &op), passes(&none, &op));
    }

    #[test]
    fn lt_and_ge_are_exact_complements(
        percent in 0u16..=10_000,
        bound in 0u16..=10_000,
    ) {
        let op = account_create_with_referrer_percent(percent);
        let lt = Restriction::lt("referrer_percent", bound);
        let ge = Restriction::ge("referrer_percent", bound);
        prop_assert_ne!(passes(&lt, &op), passes(&ge, &op));
    }

    #[test]
    fn le_and_gt_are_exact_complements(
        percent in 0u16..=10_000,
        bound in 0u16..=10_000,
    ) {
        let op = account_create_with_referrer_percent(percent);
        let le = Restriction::le("referrer_percent", bound);
        let gt = Restriction::gt("referrer_percent", bound);
        prop_assert_ne!(passes(&le, &op), passes(&gt, &op));
    }
}
