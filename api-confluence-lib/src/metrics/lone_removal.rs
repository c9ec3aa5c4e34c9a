use super::common::{as_count, interfaces_of, other_browsers, released_by};
use super::{MetricComputer, MetricKind};
use crate::model::{BrowserMetricData, Release};
use crate::service::ComputeContext;
use crate::store::Predicate;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Counts the interfaces a release removed relative to its predecessor while every
/// other browser still ships them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoneRemovalComputer;

impl LoneRemovalComputer {
    fn run(ctx: &ComputeContext, releases: &[Release], date: DateTime<Utc>) -> Result<()> {
        let considered = released_by(releases, date);

        for release in &considered {
            let value = Self::removed_count(ctx, release, &other_browsers(release, &considered))?;
            ctx.browser_metrics_store()
                .insert(BrowserMetricData::new(MetricKind::LoneRemoval, release, date, value));
        }

        Ok(())
    }

    fn removed_count(ctx: &ComputeContext, release: &Release, others: &[&Release]) -> Result<u64> {
        if others.is_empty() {
            return Ok(0);
        }

        let Some(previous) = Self::previous_release(ctx, release)? else {
            return Ok(0);
        };

        let current = interfaces_of(ctx, &release.id)?;
        let other_sets = others
            .iter()
            .map(|o| interfaces_of(ctx, &o.id))
            .collect::<Result<Vec<_>>>()?;

        let removed = interfaces_of(ctx, &previous.id)?
            .into_iter()
            .filter(|iface| !current.contains(iface) && other_sets.iter().all(|set| set.contains(iface)))
            .count();

        Ok(as_count(removed))
    }

    /// The latest scoped release of the same browser and OS shipped before `release`.
    fn previous_release(ctx: &ComputeContext, release: &Release) -> Result<Option<Release>> {
        let candidates = ctx
            .release_store()
            .clone()
            .filter(Predicate::eq("browser_name", release.browser_name.as_str()))
            .filter(Predicate::eq("os_name", release.os_name.as_str()))
            .filter(Predicate::lt("release_date", release.release_date))
            .select()?;

        Ok(candidates.into_iter().max_by(|a, b| {
            a.release_date
                .cmp(&b.release_date)
                .then_with(|| a.id.cmp(&b.id))
        }))
    }
}

impl MetricComputer for LoneRemovalComputer {
    fn kind(&self) -> MetricKind {
        MetricKind::LoneRemoval
    }

    fn compute<'a>(&'a self, ctx: &'a ComputeContext, releases: &'a [Release], date: DateTime<Utc>) -> BoxFuture<'a, Result<()>> {
        async move { Self::run(ctx, releases, date).map_err(|e| Error::computation(self.kind(), e)) }.boxed()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::metrics::test_support::{context, day, values_by_release};
    use crate::model::ReleaseWebInterfaceJunction;

    fn links(release: &Release, targets: &[&str]) -> Vec<ReleaseWebInterfaceJunction> {
        targets.iter().map(|t| ReleaseWebInterfaceJunction::new(&release.id, t)).collect()
    }

    #[tokio::test]
    async fn test_counts_lone_removals() {
        let safari_old = Release::new("Safari", "9", "macOS", "10.11", day(2015, 9, 30));
        let safari_new = Release::new("Safari", "10", "macOS", "10.11", day(2016, 9, 20));
        let chrome = Release::new("Chrome", "53", "macOS", "10.11", day(2016, 8, 31));
        let firefox = Release::new("Firefox", "49", "macOS", "10.11", day(2016, 9, 20));

        let mut junctions = links(&safari_old, &["A#a", "B#b", "C#c"]);
        junctions.extend(links(&safari_new, &["C#c"]));
        junctions.extend(links(&chrome, &["A#a", "B#b", "C#c"]));
        junctions.extend(links(&firefox, &["A#a", "C#c"]));

        let all = vec![safari_old, safari_new.clone(), chrome.clone(), firefox.clone()];
        let ctx = context(&all, &junctions, &[]);
        let releases = vec![safari_new.clone(), chrome.clone(), firefox.clone()];

        LoneRemovalComputer.compute(&ctx, &releases, day(2016, 12, 1)).await.unwrap();

        let values = values_by_release(&ctx);
        // A#a was dropped and both other browsers still have it; B#b is missing from Firefox
        assert_eq!(values[&safari_new.id], 1);
        assert_eq!(values[&chrome.id], 0);
        assert_eq!(values[&firefox.id], 0);
    }

    #[tokio::test]
    async fn test_previous_must_share_os() {
        let edge_mobile = Release::new("Edge", "14", "Windows Phone", "10.0", day(2016, 8, 2));
        let edge = Release::new("Edge", "15", "Windows", "10.0", day(2017, 4, 5));
        let chrome = Release::new("Chrome", "58", "Windows", "10.0", day(2017, 4, 19));

        let mut junctions = links(&edge_mobile, &["A#a"]);
        junctions.extend(links(&chrome, &["A#a"]));

        let all = vec![edge_mobile, edge.clone(), chrome.clone()];
        let ctx = context(&all, &junctions, &[]);

        LoneRemovalComputer
            .compute(&ctx, &[edge.clone(), chrome], day(2017, 6, 1))
            .await
            .unwrap();

        assert_eq!(values_by_release(&ctx)[&edge.id], 0);
    }

    #[tokio::test]
    async fn test_picks_latest_predecessor() {
        let v1 = Release::new("Firefox", "50", "Linux", "4.4", day(2016, 11, 15));
        let v2 = Release::new("Firefox", "51", "Linux", "4.4", day(2017, 1, 24));
        let v3 = Release::new("Firefox", "52", "Linux", "4.4", day(2017, 3, 7));
        let chrome = Release::new("Chrome", "57", "Linux", "4.4", day(2017, 3, 9));

        let mut junctions = links(&v1, &["A#a"]);
        junctions.extend(links(&v2, &["A#a", "B#b"]));
        junctions.extend(links(&v3, &["A#a"]));
        junctions.extend(links(&chrome, &["A#a", "B#b"]));

        let all = vec![v1, v2, v3.clone(), chrome.clone()];
        let ctx = context(&all, &junctions, &[]);

        LoneRemovalComputer
            .compute(&ctx, &[v3.clone(), chrome], day(2017, 6, 1))
            .await
            .unwrap();

        assert_eq!(values_by_release(&ctx)[&v3.id], 1);
    }
}
