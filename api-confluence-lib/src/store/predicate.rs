//! Serializable predicates over record fields.
//!
//! A [`Predicate`] is a plain expression tree that names fields as strings. Before it can be
//! evaluated it must be bound against a record schema with [`Predicate::bind`], which
//! checks field names, coerces date strings into timestamps, and rejects comparisons between
//! incompatible kinds.

use super::{FieldKind, Record, Value};
use crate::date::parse_date;
use crate::{Error, Result};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// A boolean test over the fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every record.
    #[default]
    All,
    Eq { field: String, value: Value },
    Ne { field: String, value: Value },
    Lt { field: String, value: Value },
    Lte { field: String, value: Value },
    Gt { field: String, value: Value },
    Gte { field: String, value: Value },
    In { field: String, values: Vec<Value> },
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl Predicate {
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Lt {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Lte {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Gt {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Gte {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn one_of<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Logical AND of two predicates, collapsing `All` and nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, p) | (p, Self::All) => p,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), p) => {
                left.push(p);
                Self::And(left)
            }
            (p, Self::And(mut right)) => {
                right.insert(0, p);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Validate this predicate against the schema of `T` and prepare it for evaluation.
    pub fn bind<T: Record>(&self) -> Result<BoundPredicate> {
        let bound = match self {
            Self::All => BoundPredicate::All,
            Self::Eq { field, value } => bind_cmp::<T>(field, CmpOp::Eq, value)?,
            Self::Ne { field, value } => bind_cmp::<T>(field, CmpOp::Ne, value)?,
            Self::Lt { field, value } => bind_cmp::<T>(field, CmpOp::Lt, value)?,
            Self::Lte { field, value } => bind_cmp::<T>(field, CmpOp::Lte, value)?,
            Self::Gt { field, value } => bind_cmp::<T>(field, CmpOp::Gt, value)?,
            Self::Gte { field, value } => bind_cmp::<T>(field, CmpOp::Gte, value)?,
            Self::In { field, values } => {
                let (name, kind) = schema_field::<T>(field)?;
                let values = values
                    .iter()
                    .map(|value| coerce::<T>(name, kind, value))
                    .collect::<Result<Vec<_>>>()?;
                BoundPredicate::In { field: name, values }
            }
            Self::And(terms) => BoundPredicate::And(terms.iter().map(Self::bind::<T>).collect::<Result<_>>()?),
            Self::Or(terms) => BoundPredicate::Or(terms.iter().map(Self::bind::<T>).collect::<Result<_>>()?),
            Self::Not(inner) => BoundPredicate::Not(Box::new(inner.bind::<T>()?)),
        };

        Ok(bound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    const fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Lt => ordering.is_lt(),
            Self::Lte => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Gte => ordering.is_ge(),
        }
    }
}

/// A predicate whose fields and values have been checked against one record schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundPredicate {
    All,
    Cmp { field: &'static str, op: CmpOp, value: Value },
    In { field: &'static str, values: Vec<Value> },
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl BoundPredicate {
    #[must_use]
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self {
            Self::All => true,
            Self::Cmp { field, op, value } => record
                .field(field)
                .and_then(|f| f.compare(value))
                .is_some_and(|ordering| op.accepts(ordering)),
            Self::In { field, values } => record
                .field(field)
                .is_some_and(|f| values.iter().any(|v| f.compare(v).is_some_and(Ordering::is_eq))),
            Self::And(terms) => terms.iter().all(|t| t.matches(record)),
            Self::Or(terms) => terms.iter().any(|t| t.matches(record)),
            Self::Not(inner) => !inner.matches(record),
        }
    }

    /// Find an equality-style term that an index on one of the fields accepted by `is_indexed`
    /// can answer. Only the top level and top-level conjunctions are considered.
    pub(crate) fn index_probe(&self, is_indexed: impl Fn(&str) -> bool + Copy) -> Option<(&'static str, Vec<&Value>)> {
        match self {
            Self::Cmp {
                field,
                op: CmpOp::Eq,
                value,
            } if is_indexed(field) => Some((*field, vec![value])),
            Self::In { field, values } if is_indexed(field) => Some((*field, values.iter().collect())),
            Self::And(terms) => terms.iter().find_map(|t| t.index_probe(is_indexed)),
            _ => None,
        }
    }
}

fn schema_field<T: Record>(field: &str) -> Result<(&'static str, FieldKind)> {
    T::schema_field(field).ok_or_else(|| Error::InvalidArgument(format!("record type {} has no field '{field}'", T::KIND)))
}

fn bind_cmp<T: Record>(field: &str, op: CmpOp, value: &Value) -> Result<BoundPredicate> {
    let (name, kind) = schema_field::<T>(field)?;
    Ok(BoundPredicate::Cmp {
        field: name,
        op,
        value: coerce::<T>(name, kind, value)?,
    })
}

fn coerce<T: Record>(field: &str, kind: FieldKind, value: &Value) -> Result<Value> {
    match (kind, value) {
        (FieldKind::Date, Value::Str(s)) => parse_date(s).map(Value::Date).ok_or_else(|| {
            Error::InvalidArgument(format!("'{s}' is not a valid date for field '{field}' of {}", T::KIND))
        }),
        (kind, value) if value.kind() == kind => Ok(value.clone()),
        (kind, value) => Err(Error::InvalidArgument(format!(
            "field '{field}' of {} holds {kind} values but was compared with a {} value",
            T::KIND,
            value.kind()
        ))),
    }
}
