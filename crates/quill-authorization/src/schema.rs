//! Field accessor registries for the operation schemas
//!
//! One [`Schema`] per operation kind, built once in a lazy static: an
//! insertion-ordered map from field name to a [`FieldSpec`] pairing the
//! field's kind with a typed extraction function. Restriction creation
//! resolves names against the registry (unknown names and kind mismatches
//! fail there, never at verification time); evaluation calls the accessor
//! against a concrete payload.
//!
//! Accessors are plain function pointers constructed at registration time.
//! The only way one can fail is being invoked against a payload of a
//! different schema - which cannot happen to a restriction that passed
//! creation-time validation, because the authority's operation-tag check runs
//! first.

use crate::errors::RestrictionError;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use quill_protocol::{AssetOptions, Operation, OperationKind, Value};

/// The payload a restriction is evaluated against
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A top-level operation
    Operation(&'a Operation),
    /// The asset-options sub-object, reached through an attribute assertion
    AssetOptions(&'a AssetOptions),
}

impl Target<'_> {
    /// Name of the schema this target belongs to
    pub fn schema_name(&self) -> &'static str {
        match self {
            Target::Operation(op) => op.kind().name(),
            Target::AssetOptions(_) => "asset_options",
        }
    }
}

/// An owned nested sub-object extracted for an attribute assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubObject {
    /// Asset options
    AssetOptions(AssetOptions),
}

impl SubObject {
    /// The sub-object's own field schema
    pub fn schema(&self) -> &'static Schema {
        match self {
            SubObject::AssetOptions(_) => Lazy::force(&ASSET_OPTIONS),
        }
    }

    /// View the sub-object as an evaluation target
    pub fn as_target(&self) -> Target<'_> {
        match self {
            SubObject::AssetOptions(options) => Target::AssetOptions(options),
        }
    }
}

/// An extracted field value, tagged by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A comparable scalar
    Value(Value),
    /// A list of comparable scalars
    List(Vec<Value>),
    /// A nested sub-object
    SubObject(SubObject),
    /// The field exists but no restriction kind applies to it
    Opaque,
    /// An optional field that is not set
    Absent,
}

/// What restriction kinds a field can support
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Comparable scalar: equality, membership, and relational kinds apply
    Comparable,
    /// List of comparable scalars: containment kinds apply
    ComparableList,
    /// Nested sub-object with its own schema: attribute assertions apply
    SubObject(&'static Schema),
    /// No restriction kind applies
    Opaque,
}

/// Typed extraction function resolved from a field name at creation time
pub type Accessor = fn(&Target<'_>) -> Result<FieldValue, RestrictionError>;

/// A registered field: its kind plus its accessor
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// What restriction kinds the field supports
    pub kind: FieldKind,
    /// Extraction function
    pub get: Accessor,
}

/// The field registry of one operation kind or sub-object
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: IndexMap<&'static str, FieldSpec>,
}

impl Schema {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: IndexMap::new(),
        }
    }

    fn field(mut self, name: &'static str, kind: FieldKind, get: Accessor) -> Self {
        self.fields.insert(name, FieldSpec { kind, get });
        self
    }

    /// Name of this schema
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registered field names, in registration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Resolve a field name, failing on unknown fields
    pub fn resolve(&self, field: &str) -> Result<&FieldSpec, RestrictionError> {
        self.fields
            .get(field)
            .ok_or_else(|| RestrictionError::unknown_field(self.name, field))
    }

    /// Resolve and extract a field from a target in one step
    pub fn extract(&self, field: &str, target: &Target<'_>) -> Result<FieldValue, RestrictionError> {
        let spec = self.resolve(field)?;
        (spec.get)(target)
    }
}

fn mismatch(expected: &'static str, target: &Target<'_>) -> RestrictionError {
    RestrictionError::schema_mismatch(expected, target.schema_name())
}

static TRANSFER: Lazy<Schema> = Lazy::new(|| {
    Schema::new("transfer")
        .field("from", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::Transfer(op)) => {
                Ok(FieldValue::Value(Value::Account(op.from)))
            }
            other => Err(mismatch("transfer", other)),
        })
        .field("to", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::Transfer(op)) => {
                Ok(FieldValue::Value(Value::Account(op.to)))
            }
            other => Err(mismatch("transfer", other)),
        })
        .field("amount", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::Transfer(op)) => {
                Ok(FieldValue::Value(Value::Amount(op.amount)))
            }
            other => Err(mismatch("transfer", other)),
        })
});

static ACCOUNT_CREATE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("account_create")
        .field("registrar", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AccountCreate(op)) => {
                Ok(FieldValue::Value(Value::Account(op.registrar)))
            }
            other => Err(mismatch("account_create", other)),
        })
        .field("referrer", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AccountCreate(op)) => {
                Ok(FieldValue::Value(Value::Account(op.referrer)))
            }
            other => Err(mismatch("account_create", other)),
        })
        .field("referrer_percent", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AccountCreate(op)) => {
                Ok(FieldValue::Value(Value::UInt(u64::from(op.referrer_percent))))
            }
            other => Err(mismatch("account_create", other)),
        })
        .field("name", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AccountCreate(op)) => {
                Ok(FieldValue::Value(Value::String(op.name.clone())))
            }
            other => Err(mismatch("account_create", other)),
        })
});

static ACCOUNT_UPDATE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("account_update").field("account", FieldKind::Comparable, |t| match t {
        Target::Operation(Operation::AccountUpdate(op)) => {
            Ok(FieldValue::Value(Value::Account(op.account)))
        }
        other => Err(mismatch("account_update", other)),
    })
});

static ASSET_CREATE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("asset_create")
        .field("issuer", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AssetCreate(op)) => {
                Ok(FieldValue::Value(Value::Account(op.issuer)))
            }
            other => Err(mismatch("asset_create", other)),
        })
        .field("symbol", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AssetCreate(op)) => {
                Ok(FieldValue::Value(Value::String(op.symbol.clone())))
            }
            other => Err(mismatch("asset_create", other)),
        })
        .field(
            "common_options",
            FieldKind::SubObject(Lazy::force(&ASSET_OPTIONS)),
            |t| match t {
                Target::Operation(Operation::AssetCreate(op)) => Ok(FieldValue::SubObject(
                    SubObject::AssetOptions(op.common_options.clone()),
                )),
                other => Err(mismatch("asset_create", other)),
            },
        )
});

static ASSET_UPDATE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("asset_update")
        .field("issuer", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AssetUpdate(op)) => {
                Ok(FieldValue::Value(Value::Account(op.issuer)))
            }
            other => Err(mismatch("asset_update", other)),
        })
        .field("new_issuer", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::AssetUpdate(op)) => Ok(match op.new_issuer {
                Some(account) => FieldValue::Value(Value::Account(account)),
                None => FieldValue::Absent,
            }),
            other => Err(mismatch("asset_update", other)),
        })
        .field(
            "new_options",
            FieldKind::SubObject(Lazy::force(&ASSET_OPTIONS)),
            |t| match t {
                Target::Operation(Operation::AssetUpdate(op)) => Ok(match &op.new_options {
                    Some(options) => {
                        FieldValue::SubObject(SubObject::AssetOptions(options.clone()))
                    }
                    None => FieldValue::Absent,
                }),
                other => Err(mismatch("asset_update", other)),
            },
        )
});

static ASSERT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("assert")
        .field("fee_paying_account", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::Assert(op)) => {
                Ok(FieldValue::Value(Value::Account(op.fee_paying_account)))
            }
            other => Err(mismatch("assert", other)),
        })
        .field("required_auths", FieldKind::ComparableList, |t| match t {
            Target::Operation(Operation::Assert(op)) => Ok(FieldValue::List(
                op.required_auths
                    .iter()
                    .map(|account| Value::Account(*account))
                    .collect(),
            )),
            other => Err(mismatch("assert", other)),
        })
        .field("predicates", FieldKind::Opaque, |t| match t {
            Target::Operation(Operation::Assert(_)) => Ok(FieldValue::Opaque),
            other => Err(mismatch("assert", other)),
        })
});

static CUSTOM_AUTHORITY_CREATE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("custom_authority_create")
        .field("account", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::CustomAuthorityCreate(op)) => {
                Ok(FieldValue::Value(Value::Account(op.account)))
            }
            other => Err(mismatch("custom_authority_create", other)),
        })
        .field("operation_type", FieldKind::Comparable, |t| match t {
            Target::Operation(Operation::CustomAuthorityCreate(op)) => {
                Ok(FieldValue::Value(Value::UInt(u64::from(op.operation_type))))
            }
            other => Err(mismatch("custom_authority_create", other)),
        })
});

static CUSTOM_AUTHORITY_UPDATE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("custom_authority_update").field("account", FieldKind::Comparable, |t| match t {
        Target::Operation(Operation::CustomAuthorityUpdate(op)) => {
            Ok(FieldValue::Value(Value::Account(op.account)))
        }
        other => Err(mismatch("custom_authority_update", other)),
    })
});

static CUSTOM_AUTHORITY_DELETE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("custom_authority_delete").field("account", FieldKind::Comparable, |t| match t {
        Target::Operation(Operation::CustomAuthorityDelete(op)) => {
            Ok(FieldValue::Value(Value::Account(op.account)))
        }
        other => Err(mismatch("custom_authority_delete", other)),
    })
});

static ASSET_OPTIONS: Lazy<Schema> = Lazy::new(|| {
    Schema::new("asset_options")
        .field("max_supply", FieldKind::Comparable, |t| match t {
            Target::AssetOptions(options) => Ok(FieldValue::Value(Value::Int(options.max_supply))),
            other => Err(mismatch("asset_options", other)),
        })
        .field("market_fee_percent", FieldKind::Comparable, |t| match t {
            Target::AssetOptions(options) => Ok(FieldValue::Value(Value::UInt(u64::from(
                options.market_fee_percent,
            )))),
            other => Err(mismatch("asset_options", other)),
        })
        .field("flags", FieldKind::Comparable, |t| match t {
            Target::AssetOptions(options) => {
                Ok(FieldValue::Value(Value::UInt(u64::from(options.flags))))
            }
            other => Err(mismatch("asset_options", other)),
        })
});

/// The field registry of an operation kind
pub fn schema_for(kind: OperationKind) -> &'static Schema {
    match kind {
        OperationKind::Transfer => Lazy::force(&TRANSFER),
        OperationKind::AccountCreate => Lazy::force(&ACCOUNT_CREATE),
        OperationKind::AccountUpdate => Lazy::force(&ACCOUNT_UPDATE),
        OperationKind::AssetCreate => Lazy::force(&ASSET_CREATE),
        OperationKind::AssetUpdate => Lazy::force(&ASSET_UPDATE),
        OperationKind::Assert => Lazy::force(&ASSERT),
        OperationKind::CustomAuthorityCreate => Lazy::force(&CUSTOM_AUTHORITY_CREATE),
        OperationKind::CustomAuthorityUpdate => Lazy::force(&CUSTOM_AUTHORITY_UPDATE),
        OperationKind::CustomAuthorityDelete => Lazy::force(&CUSTOM_AUTHORITY_DELETE),
    }
}

/// The field registry of a concrete operation
pub fn operation_schema(op: &Operation) -> &'static Schema {
    schema_for(op.kind())
}
