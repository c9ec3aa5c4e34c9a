use super::common::{as_count, compat_rows, other_browsers, released_by};
use super::{MetricComputer, MetricKind};
use crate::model::{BrowserMetricData, Release};
use crate::service::ComputeContext;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Counts the interfaces a release supports that no other browser's release supports.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpecificComputer;

impl BrowserSpecificComputer {
    fn run(ctx: &ComputeContext, releases: &[Release], date: DateTime<Utc>) -> Result<()> {
        let rows = compat_rows(ctx)?;
        let considered = released_by(releases, date);

        for release in &considered {
            let others = other_browsers(release, &considered);
            let value = rows
                .iter()
                .filter(|row| row.is_supported_by(&release.id) && !others.iter().any(|o| row.is_supported_by(&o.id)))
                .count();

            ctx.browser_metrics_store()
                .insert(BrowserMetricData::new(MetricKind::BrowserSpecific, release, date, as_count(value)));
        }

        Ok(())
    }
}

impl MetricComputer for BrowserSpecificComputer {
    fn kind(&self) -> MetricKind {
        MetricKind::BrowserSpecific
    }

    fn compute<'a>(&'a self, ctx: &'a ComputeContext, releases: &'a [Release], date: DateTime<Utc>) -> BoxFuture<'a, Result<()>> {
        async move { Self::run(ctx, releases, date).map_err(|e| Error::computation(self.kind(), e)) }.boxed()
    }
}
