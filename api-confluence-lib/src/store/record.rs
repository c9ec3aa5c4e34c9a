use chrono::{DateTime, Utc};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use strum::Display;

/// The type of a queryable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    Date,
}

/// An owned field value, used in predicates and as a secondary index key.
///
/// Strings always deserialize as [`Value::Str`], even when they look like timestamps.
/// Binding a predicate turns them into dates for date fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Date(DateTime<Utc>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Date(_) => FieldKind::Date,
            Self::Str(_) => FieldKind::Str,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// A borrowed view of one field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Str(&'a str),
    Int(i64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl FieldRef<'_> {
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::Str(s.to_string()),
            Self::Int(i) => Value::Int(i),
            Self::Bool(b) => Value::Bool(b),
            Self::Date(d) => Value::Date(d),
        }
    }

    /// Compare against a value of the same kind; `None` when the kinds differ.
    #[must_use]
    pub fn compare(self, value: &Value) -> Option<Ordering> {
        match (self, value) {
            (Self::Str(a), Value::Str(b)) => Some(a.cmp(b.as_str())),
            (Self::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Self::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Rust types that can back a queryable record field.
pub trait FieldType {
    const KIND: FieldKind;

    fn as_field(&self) -> FieldRef<'_>;
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Str;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Str(self)
    }
}

impl FieldType for i64 {
    const KIND: FieldKind = FieldKind::Int;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Int(*self)
    }
}

impl FieldType for u64 {
    const KIND: FieldKind = FieldKind::Int;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Bool(*self)
    }
}

impl FieldType for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::Date;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Date(*self)
    }
}

/// A typed record that can live in an [`IndexedStore`](super::IndexedStore).
pub trait Record: Clone + Send + Sync + 'static {
    /// Record type identifier; also names the record set's source file.
    const KIND: &'static str;

    /// Queryable fields and their kinds.
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Fields that get a secondary index as soon as a loaded store is populated.
    const INDEXED_FIELDS: &'static [&'static str] = &[];

    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Look up a field's canonical name and kind in the schema.
    #[must_use]
    fn schema_field(name: &str) -> Option<(&'static str, FieldKind)> {
        Self::FIELDS.iter().find(|(field, _)| *field == name).copied()
    }
}

/// Generates a record struct and its [`Record`] implementation from a field list.
///
/// Creates:
/// - the struct itself, deserialized from camelCase JSON
/// - `Record::KIND` set to the given identifier
/// - `Record::FIELDS` listing every field with its [`FieldKind`]
/// - `Record::INDEXED_FIELDS` from the optional `indexed [..]` clause
///
/// See `model/release.rs` or `model/junction.rs` for usage examples.
macro_rules! define_record {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:literal $(, indexed [$($indexed:ident),* $(,)?])? {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $field_type:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $field_type,
            )*
        }

        impl $crate::store::Record for $name {
            const KIND: &'static str = $kind;

            const FIELDS: &'static [(&'static str, $crate::store::FieldKind)] = &[
                $(
                    (stringify!($field), <$field_type as $crate::store::FieldType>::KIND),
                )*
            ];

            $(
                const INDEXED_FIELDS: &'static [&'static str] = &[$(stringify!($indexed)),*];
            )?

            fn field(&self, name: &str) -> Option<$crate::store::FieldRef<'_>> {
                match name {
                    $(
                        stringify!($field) => Some($crate::store::FieldType::as_field(&self.$field)),
                    )*
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use define_record;
