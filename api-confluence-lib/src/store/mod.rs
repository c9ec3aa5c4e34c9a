//! In-memory record stores
//!
//! An [`IndexedStore`] holds records of a single [`Record`] type behind a shared handle.
//! Reads go through a [`StoreView`], which carries a [`Predicate`] and is evaluated lazily:
//! nothing is materialized until [`StoreView::select`] or [`StoreView::count`] is called.
//!
//! # Implementation Model
//!
//! Records describe their queryable fields through [`Record::FIELDS`]. Predicates name
//! fields as plain strings and are bound against that schema at query time, which turns
//! field names into static schema entries and coerces date strings into timestamps. A
//! predicate that names an unknown field or compares incompatible kinds fails binding with
//! [`Error::InvalidArgument`](crate::Error::InvalidArgument).
//!
//! Secondary indexes map a field value to row positions. When a bound predicate is an
//! equality or `in` test on an indexed field (directly or as one term of a conjunction),
//! candidate rows come from the index and the full predicate is applied to those candidates
//! only.

mod indexed_store;
mod predicate;
mod record;

pub use indexed_store::{IndexedStore, StoreView};
pub use predicate::{BoundPredicate, CmpOp, Predicate};
pub(crate) use record::define_record;
pub use record::{FieldKind, FieldRef, FieldType, Record, Value};

const LOG_TARGET: &str = "     store";
