use crate::model::{CompatData, Release, ReleaseWebInterfaceJunction};
use crate::service::{ComputeContext, InputStores};
use crate::store::{IndexedStore, Record};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn indexed<T: Record>(records: &[T]) -> IndexedStore<T> {
    let store = IndexedStore::new();
    store.extend(records.iter().cloned());
    for field in T::INDEXED_FIELDS {
        store.add_index(field).unwrap();
    }
    store
}

/// A compute context over in-memory inputs with an unrestricted release scope.
pub fn context(releases: &[Release], junctions: &[ReleaseWebInterfaceJunction], compat: &[CompatData]) -> ComputeContext {
    ComputeContext::new(InputStores::new(
        indexed(releases).view(),
        IndexedStore::new(),
        indexed(junctions),
        indexed(compat),
    ))
}

/// Browser metric values keyed by release id.
pub fn values_by_release(ctx: &ComputeContext) -> HashMap<String, u64> {
    ctx.browser_metrics_store()
        .select_all()
        .into_iter()
        .map(|m| (m.release_id, m.value))
        .collect()
}
