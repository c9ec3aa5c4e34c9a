use super::{ApiCountComputer, BrowserSpecificComputer, LoneOmissionComputer, LoneRemovalComputer, MetricComputer, MetricKind};
use crate::service::StoreName;

/// Binds a metric kind to the computer that implements it and the store it writes to.
#[derive(Debug)]
pub struct RegistryEntry {
    pub kind: MetricKind,
    pub description: &'static str,
    pub output_store: StoreName,
    pub factory: fn() -> Box<dyn MetricComputer>,
}

impl RegistryEntry {
    /// Create a fresh computer for one run.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn MetricComputer> {
        (self.factory)()
    }
}

macro_rules! registry_entry {
    ($kind:ident, $computer:ident, $store:ident, $description:expr) => {
        RegistryEntry {
            kind: MetricKind::$kind,
            description: $description,
            output_store: StoreName::$store,
            factory: || Box::new($computer) as Box<dyn MetricComputer>,
        }
    };
}

/// Entries are listed in `MetricKind` declaration order.
static REGISTRY: [RegistryEntry; 4] = [
    registry_entry!(
        LoneRemoval,
        LoneRemovalComputer,
        BrowserMetricsStore,
        "Interfaces a release dropped that every other browser still ships"
    ),
    registry_entry!(
        BrowserSpecific,
        BrowserSpecificComputer,
        BrowserMetricsStore,
        "Interfaces only this browser supports"
    ),
    registry_entry!(
        LoneOmission,
        LoneOmissionComputer,
        BrowserMetricsStore,
        "Interfaces every other browser supports but this release does not"
    ),
    registry_entry!(ApiCount, ApiCountComputer, ApiCountStore, "Total interfaces a release exposes"),
];

/// Look up the registry entry for `kind`.
#[must_use]
pub fn resolve(kind: MetricKind) -> &'static RegistryEntry {
    &REGISTRY[kind as usize]
}

/// Every registry entry, in declaration order.
#[must_use]
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}
