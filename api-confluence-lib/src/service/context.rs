use crate::model::{ApiCountData, BrowserMetricData, CompatData, OutputRecord, Release, ReleaseWebInterfaceJunction, WebInterface};
use crate::store::{IndexedStore, StoreView};
use crate::{Error, Result};
use strum::Display;

/// Fixed names under which a [`ComputeContext`] exposes its stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum StoreName {
    ReleaseStore,
    WebInterfaceStore,
    ReleaseWebInterfaceJunctionStore,
    CompatStore,
    BrowserMetricsStore,
    ApiCountStore,
}

/// Read-only input stores shared by every run of a service.
#[derive(Debug, Clone)]
pub struct InputStores {
    releases: StoreView<Release>,
    web_interfaces: IndexedStore<WebInterface>,
    junctions: IndexedStore<ReleaseWebInterfaceJunction>,
    compat: IndexedStore<CompatData>,
}

impl InputStores {
    /// `releases` is expected to already carry the release scope.
    #[must_use]
    pub const fn new(
        releases: StoreView<Release>,
        web_interfaces: IndexedStore<WebInterface>,
        junctions: IndexedStore<ReleaseWebInterfaceJunction>,
        compat: IndexedStore<CompatData>,
    ) -> Self {
        Self {
            releases,
            web_interfaces,
            junctions,
            compat,
        }
    }

    #[must_use]
    pub const fn releases(&self) -> &StoreView<Release> {
        &self.releases
    }
}

#[derive(Debug, Default)]
struct OutputStores {
    browser_metrics: IndexedStore<BrowserMetricData>,
    api_counts: IndexedStore<ApiCountData>,
}

/// Everything one metric run can see: the shared inputs and output stores that belong
/// to this run alone.
///
/// A context is created for every compute call and dropped once its output has been read,
/// so nothing written during one run is visible to another.
#[derive(Debug)]
pub struct ComputeContext {
    inputs: InputStores,
    outputs: OutputStores,
}

impl ComputeContext {
    /// Bind `inputs` together with a fresh, empty set of output stores.
    #[must_use]
    pub fn new(inputs: InputStores) -> Self {
        Self {
            inputs,
            outputs: OutputStores::default(),
        }
    }

    /// Releases visible to this run, already restricted by the release scope.
    #[must_use]
    pub const fn release_store(&self) -> &StoreView<Release> {
        &self.inputs.releases
    }

    #[must_use]
    pub const fn web_interface_store(&self) -> &IndexedStore<WebInterface> {
        &self.inputs.web_interfaces
    }

    #[must_use]
    pub const fn junction_store(&self) -> &IndexedStore<ReleaseWebInterfaceJunction> {
        &self.inputs.junctions
    }

    #[must_use]
    pub const fn compat_store(&self) -> &IndexedStore<CompatData> {
        &self.inputs.compat
    }

    #[must_use]
    pub const fn browser_metrics_store(&self) -> &IndexedStore<BrowserMetricData> {
        &self.outputs.browser_metrics
    }

    #[must_use]
    pub const fn api_count_store(&self) -> &IndexedStore<ApiCountData> {
        &self.outputs.api_counts
    }

    /// Read every record from the named output store.
    pub fn read_output(&self, name: StoreName) -> Result<Vec<OutputRecord>> {
        match name {
            StoreName::BrowserMetricsStore => Ok(self.outputs.browser_metrics.select_all().into_iter().map(Into::into).collect()),
            StoreName::ApiCountStore => Ok(self.outputs.api_counts.select_all().into_iter().map(Into::into).collect()),
            other => Err(Error::InvalidArgument(format!("'{other}' is an input store, not an output store"))),
        }
    }
}
