use super::MetricKind;
use crate::Result;
use crate::model::Release;
use crate::service::ComputeContext;
use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;

/// A pluggable strategy that reads a compute context's input stores and writes
/// records into its output store.
///
/// The service hands every computer a context whose output stores are fresh and
/// exclusive to the current run, together with the run's scoped releases.
pub trait MetricComputer: Send + Sync {
    fn kind(&self) -> MetricKind;

    fn compute<'a>(&'a self, ctx: &'a ComputeContext, releases: &'a [Release], date: DateTime<Utc>) -> BoxFuture<'a, Result<()>>;
}
