use super::common::{as_count, compat_rows, other_browsers, released_by};
use super::{MetricComputer, MetricKind};
use crate::model::{BrowserMetricData, Release};
use crate::service::ComputeContext;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Counts the interfaces every other browser supports but the release does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoneOmissionComputer;

impl LoneOmissionComputer {
    fn run(ctx: &ComputeContext, releases: &[Release], date: DateTime<Utc>) -> Result<()> {
        let rows = compat_rows(ctx)?;
        let considered = released_by(releases, date);

        for release in &considered {
            let others = other_browsers(release, &considered);
            let value = if others.is_empty() {
                0
            } else {
                rows.iter()
                    .filter(|row| !row.is_supported_by(&release.id) && others.iter().all(|o| row.is_supported_by(&o.id)))
                    .count()
            };

            ctx.browser_metrics_store()
                .insert(BrowserMetricData::new(MetricKind::LoneOmission, release, date, as_count(value)));
        }

        Ok(())
    }
}

impl MetricComputer for LoneOmissionComputer {
    fn kind(&self) -> MetricKind {
        MetricKind::LoneOmission
    }

    fn compute<'a>(&'a self, ctx: &'a ComputeContext, releases: &'a [Release], date: DateTime<Utc>) -> BoxFuture<'a, Result<()>> {
        async move { Self::run(ctx, releases, date).map_err(|e| Error::computation(self.kind(), e)) }.boxed()
    }
}
