use super::common::{as_count, interfaces_of, released_by};
use super::{MetricComputer, MetricKind};
use crate::model::{ApiCountData, Release};
use crate::service::ComputeContext;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Counts the web interfaces each release exposes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiCountComputer;

impl ApiCountComputer {
    fn run(ctx: &ComputeContext, releases: &[Release], date: DateTime<Utc>) -> Result<()> {
        for release in released_by(releases, date) {
            let total_apis = as_count(interfaces_of(ctx, &release.id)?.len());
            ctx.api_count_store().insert(ApiCountData::new(release, date, total_apis));
        }

        Ok(())
    }
}

impl MetricComputer for ApiCountComputer {
    fn kind(&self) -> MetricKind {
        MetricKind::ApiCount
    }

    fn compute<'a>(&'a self, ctx: &'a ComputeContext, releases: &'a [Release], date: DateTime<Utc>) -> BoxFuture<'a, Result<()>> {
        async move { Self::run(ctx, releases, date).map_err(|e| Error::computation(self.kind(), e)) }.boxed()
    }
}
