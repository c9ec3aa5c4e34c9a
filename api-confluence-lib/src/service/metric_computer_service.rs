use super::{ComputeContext, InputStores, StoreName};
use crate::date::parse_date;
use crate::loader::StoreLoader;
use crate::metrics::{MetricComputer, MetricKind, resolve};
use crate::model::{CompatData, OutputRecord, Release, ReleaseWebInterfaceJunction, WebInterface};
use crate::store::{BoundPredicate, Predicate, StoreView};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use core::sync::atomic::{AtomicU64, Ordering};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::OnceCell;

const LOG_TARGET: &str = "   service";

/// Data directory used when neither a directory nor a loader is configured.
pub const DEFAULT_DATA_DIR: &str = "data/json";

/// Runs metric computers over scoped release data.
///
/// The service owns a [`StoreLoader`] and a release scope. Input stores are loaded on first
/// use and kept for the lifetime of the service. Every call to [`compute`](Self::compute)
/// works in its own [`ComputeContext`], so concurrent calls never observe each other's output.
#[derive(Debug)]
pub struct MetricComputerService {
    loader: StoreLoader,
    scope: Predicate,
    bound_scope: BoundPredicate,
    inputs: OnceCell<InputStores>,
    contexts_created: AtomicU64,
}

impl MetricComputerService {
    #[must_use]
    pub fn builder() -> MetricComputerServiceBuilder {
        MetricComputerServiceBuilder::default()
    }

    #[must_use]
    pub const fn loader(&self) -> &StoreLoader {
        &self.loader
    }

    /// Number of compute contexts created so far.
    #[must_use]
    pub fn contexts_created(&self) -> u64 {
        self.contexts_created.load(Ordering::Relaxed)
    }

    /// The loaded release store, restricted by the service's scope.
    pub async fn release_store(&self) -> Result<StoreView<Release>> {
        Ok(self.input_stores().await?.releases().clone())
    }

    /// Compute `kind` for `releases` as of `date` and return the records the computer produced.
    ///
    /// `date` must be RFC 3339, `YYYY-MM-DD`, or a naive date-time taken as UTC. Releases
    /// outside the service's scope are dropped before the computer sees them.
    pub async fn compute(&self, kind: MetricKind, releases: &[Release], date: &str) -> Result<Vec<OutputRecord>> {
        let date = parse_date(date).ok_or_else(|| Error::InvalidDate(date.to_string()))?;
        let start_time = Instant::now();

        let inputs = self.input_stores().await?.clone();
        let ctx = ComputeContext::new(inputs);
        let _ = self.contexts_created.fetch_add(1, Ordering::Relaxed);

        let releases: Vec<Release> = releases.iter().filter(|r| self.bound_scope.matches(*r)).cloned().collect();

        let entry = resolve(kind);
        let computer = entry.instantiate();

        log::info!(
            target: LOG_TARGET,
            "Computing {kind} for {} releases as of {}",
            releases.len(),
            date.format("%Y-%m-%d")
        );

        let records = run_computer(&ctx, computer.as_ref(), &releases, date, entry.output_store).await?;

        log::info!(
            target: LOG_TARGET,
            "Computed {kind}: {} records in {} in {:.3}s",
            records.len(),
            entry.output_store,
            start_time.elapsed().as_secs_f64()
        );

        Ok(records)
    }

    async fn input_stores(&self) -> Result<&InputStores> {
        self.inputs
            .get_or_try_init(|| async {
                let (releases, web_interfaces, junctions, compat) = tokio::try_join!(
                    self.loader.load::<Release>(),
                    self.loader.load::<WebInterface>(),
                    self.loader.load::<ReleaseWebInterfaceJunction>(),
                    self.loader.load::<CompatData>(),
                )?;

                log::debug!(
                    target: LOG_TARGET,
                    "Input stores ready from '{}': {} releases, {} web interfaces, {} junctions, {} compat rows",
                    self.loader.data_dir().display(),
                    releases.len(),
                    web_interfaces.len(),
                    junctions.len(),
                    compat.len()
                );

                Ok::<_, Error>(InputStores::new(releases.filter(self.scope.clone()), web_interfaces, junctions, compat))
            })
            .await
    }
}

/// Run `computer` in `ctx` and read back everything it wrote to `output`.
///
/// A failing computer's error is returned as is and its partial output is dropped with the context.
pub(crate) async fn run_computer(
    ctx: &ComputeContext,
    computer: &dyn MetricComputer,
    releases: &[Release],
    date: DateTime<Utc>,
    output: StoreName,
) -> Result<Vec<OutputRecord>> {
    computer.compute(ctx, releases, date).await?;
    ctx.read_output(output)
}

/// Builder for [`MetricComputerService`].
#[derive(Debug, Default)]
pub struct MetricComputerServiceBuilder {
    scope: Option<Predicate>,
    loader: Option<StoreLoader>,
}

impl MetricComputerServiceBuilder {
    /// Restrict every release the service exposes to those matching `scope`. Required.
    #[must_use]
    pub fn scope(mut self, scope: Predicate) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Read input files from `data_dir`.
    #[must_use]
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.loader = Some(StoreLoader::new(data_dir));
        self
    }

    /// Share an existing loader and its memoized loads.
    #[must_use]
    pub fn loader(mut self, loader: StoreLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn build(self) -> Result<MetricComputerService> {
        let scope = self
            .scope
            .ok_or_else(|| Error::Validation("a release scope is required".to_string()))?;

        let bound_scope = scope
            .bind::<Release>()
            .map_err(|e| Error::Validation(format!("release scope is malformed: {e}")))?;

        Ok(MetricComputerService {
            loader: self.loader.unwrap_or_else(|| StoreLoader::new(DEFAULT_DATA_DIR)),
            scope,
            bound_scope,
            inputs: OnceCell::new(),
            contexts_created: AtomicU64::new(0),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::model::BrowserMetricData;
    use crate::store::IndexedStore;
    use chrono::TimeZone;
    use futures_util::FutureExt;
    use futures_util::future::BoxFuture;
    use std::sync::Arc;

    /// Writes one record per release, then fails with a fixed error.
    #[derive(Debug)]
    struct FailingComputer {
        error: Error,
    }

    impl MetricComputer for FailingComputer {
        fn kind(&self) -> MetricKind {
            MetricKind::LoneRemoval
        }

        fn compute<'a>(&'a self, ctx: &'a ComputeContext, releases: &'a [Release], date: DateTime<Utc>) -> BoxFuture<'a, Result<()>> {
            async move {
                for release in releases {
                    ctx.browser_metrics_store()
                        .insert(BrowserMetricData::new(self.kind(), release, date, 1));
                }
                Err(self.error.clone())
            }
            .boxed()
        }
    }

    fn empty_inputs() -> InputStores {
        InputStores::new(IndexedStore::new().view(), IndexedStore::new(), IndexedStore::new(), IndexedStore::new())
    }

    #[test]
    fn test_scope_is_required() {
        let err = MetricComputerService::builder().data_dir("unused").build().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_malformed_scope_fails_validation() {
        let err = MetricComputerService::builder()
            .scope(Predicate::eq("vendor", "Apple"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_default_data_dir() {
        let service = MetricComputerService::builder().scope(Predicate::All).build().unwrap();
        assert_eq!(service.loader().data_dir(), std::path::Path::new(DEFAULT_DATA_DIR));
    }

    #[tokio::test]
    async fn test_invalid_date_rejected_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let service = MetricComputerService::builder()
            .scope(Predicate::All)
            .data_dir(dir.path())
            .build()
            .unwrap();

        let err = service.compute(MetricKind::ApiCount, &[], "not-a-date").await.unwrap_err();
        assert!(matches!(err, Error::InvalidDate(ref s) if s == "not-a-date"));
        assert_eq!(service.loader().reads_started(), 0);
        assert_eq!(service.contexts_created(), 0);
    }

    #[tokio::test]
    async fn test_missing_inputs_surface_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = MetricComputerService::builder()
            .scope(Predicate::All)
            .data_dir(dir.path())
            .build()
            .unwrap();

        let err = service.compute(MetricKind::ApiCount, &[], "2017-01-01").await.unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert_eq!(service.contexts_created(), 0);
    }

    #[tokio::test]
    async fn test_computer_failure_is_propagated_without_output() {
        let date = Utc.with_ymd_and_hms(2017, 6, 1, 0, 0, 0).unwrap();
        let release = Release::new("Edge", "15", "Windows", "10.0", Utc.with_ymd_and_hms(2017, 4, 5, 0, 0, 0).unwrap());
        let computer = FailingComputer {
            error: Error::computation(MetricKind::LoneRemoval, std::io::Error::other("compat rows unavailable")),
        };

        let inputs = empty_inputs();
        let ctx = ComputeContext::new(inputs.clone());
        let err = run_computer(&ctx, &computer, std::slice::from_ref(&release), date, StoreName::BrowserMetricsStore)
            .await
            .unwrap_err();

        match (&err, &computer.error) {
            (Error::Computation { metric, cause }, Error::Computation { cause: original, .. }) => {
                assert_eq!(*metric, MetricKind::LoneRemoval);
                assert!(Arc::ptr_eq(cause, original));
            }
            _ => panic!("expected the computer's own error, got {err:?}"),
        }

        // the partial write stays in the failed run's context
        assert_eq!(ctx.browser_metrics_store().len(), 1);
        let next = ComputeContext::new(inputs);
        assert!(next.read_output(StoreName::BrowserMetricsStore).unwrap().is_empty());
    }
}
