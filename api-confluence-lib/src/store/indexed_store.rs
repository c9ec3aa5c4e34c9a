use super::{BoundPredicate, Predicate, Record, Value};
use crate::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Secondary index: field value to row positions, in insertion order.
type FieldIndex = HashMap<Value, Vec<usize>>;

#[derive(Debug)]
struct StoreInner<T> {
    records: Vec<T>,
    indexes: HashMap<&'static str, FieldIndex>,
}

/// An in-memory collection of records of one type with optional secondary indexes.
///
/// Cloning an `IndexedStore` yields another handle onto the same records. Use
/// [`IndexedStore::new`] to get a distinct, empty store.
#[derive(Debug)]
pub struct IndexedStore<T> {
    inner: Arc<RwLock<StoreInner<T>>>,
}

impl<T> Clone for IndexedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Record> Default for IndexedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> IndexedStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                records: Vec::new(),
                indexes: HashMap::new(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner<T>> {
        self.inner.read().expect("lock not poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner<T>> {
        self.inner.write().expect("lock not poisoned")
    }

    /// Add a record, updating every secondary index.
    pub fn insert(&self, record: T) {
        let mut inner = self.write();
        let position = inner.records.len();

        for (field, index) in &mut inner.indexes {
            if let Some(value) = record.field(field) {
                index.entry(value.to_value()).or_default().push(position);
            }
        }

        inner.records.push(record);
    }

    /// Add every record from `records`, holding the write lock once.
    pub fn extend(&self, records: impl IntoIterator<Item = T>) {
        let mut inner = self.write();
        let StoreInner { records: rows, indexes } = &mut *inner;

        for record in records {
            let position = rows.len();
            for (field, index) in indexes.iter_mut() {
                if let Some(value) = record.field(field) {
                    index.entry(value.to_value()).or_default().push(position);
                }
            }
            rows.push(record);
        }
    }

    /// Build a secondary index over `field` from the current contents.
    ///
    /// The index is maintained on every later insert. Indexing an already indexed
    /// field is a no-op.
    pub fn add_index(&self, field: &str) -> Result<()> {
        let (name, _) =
            T::schema_field(field).ok_or_else(|| Error::InvalidArgument(format!("cannot index unknown field '{field}' of {}", T::KIND)))?;

        let mut inner = self.write();
        if inner.indexes.contains_key(name) {
            return Ok(());
        }

        let mut index = FieldIndex::new();
        for (position, record) in inner.records.iter().enumerate() {
            if let Some(value) = record.field(name) {
                index.entry(value.to_value()).or_default().push(position);
            }
        }

        log::trace!(target: super::LOG_TARGET, "Indexed {}.{name} ({} distinct keys)", T::KIND, index.len());
        let _ = inner.indexes.insert(name, index);
        Ok(())
    }

    #[must_use]
    pub fn has_index(&self, field: &str) -> bool {
        self.read().indexes.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Whether `other` is a handle onto the same underlying store.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// A view restricted to records matching `predicate`.
    #[must_use]
    pub fn filter(&self, predicate: Predicate) -> StoreView<T> {
        StoreView {
            store: self.clone(),
            predicate,
        }
    }

    /// An unrestricted view over the whole store.
    #[must_use]
    pub fn view(&self) -> StoreView<T> {
        self.filter(Predicate::All)
    }

    /// Every record in the store.
    #[must_use]
    pub fn select_all(&self) -> Vec<T> {
        self.read().records.clone()
    }

    fn select_bound(&self, predicate: &BoundPredicate) -> Vec<T> {
        let inner = self.read();

        if let Some((field, keys)) = predicate.index_probe(|f| inner.indexes.contains_key(f)) {
            let index = &inner.indexes[field];
            let positions: BTreeSet<usize> = keys
                .into_iter()
                .filter_map(|key| index.get(key))
                .flatten()
                .copied()
                .collect();

            return positions
                .into_iter()
                .map(|position| &inner.records[position])
                .filter(|record| predicate.matches(*record))
                .cloned()
                .collect();
        }

        inner.records.iter().filter(|record| predicate.matches(*record)).cloned().collect()
    }
}

/// A lazily evaluated, filtered view over an [`IndexedStore`].
///
/// Views never copy or mutate the store; they are evaluated when
/// [`select`](StoreView::select) or [`count`](StoreView::count) is called and
/// therefore observe records inserted after the view was created.
#[derive(Debug, Clone)]
pub struct StoreView<T> {
    store: IndexedStore<T>,
    predicate: Predicate,
}

impl<T: Record> StoreView<T> {
    /// Narrow the view further; the result matches both predicates.
    #[must_use]
    pub fn filter(self, predicate: Predicate) -> Self {
        Self {
            store: self.store,
            predicate: self.predicate.and(predicate),
        }
    }

    /// Materialize the matching records. Order is unspecified.
    pub fn select(&self) -> Result<Vec<T>> {
        let bound = self.predicate.bind::<T>()?;
        Ok(self.store.select_bound(&bound))
    }

    pub fn count(&self) -> Result<usize> {
        self.select().map(|records| records.len())
    }
}
