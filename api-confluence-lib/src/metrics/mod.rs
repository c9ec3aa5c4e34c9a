//! Metric kinds, the computers that implement them, and the registry binding the two
//!
//! # Implementation Model
//!
//! Every [`MetricKind`] has exactly one [`RegistryEntry`], which names the [`MetricComputer`]
//! factory for the kind and the output store the computer writes into. The registry is a
//! static table; [`resolve`] is total over the enum.
//!
//! Computers are opaque to the service. They receive a [`ComputeContext`](crate::service::ComputeContext)
//! holding the shared input stores and a set of output stores created for the current run,
//! plus the run's scoped releases and evaluation date. The reference computers only consider
//! releases shipped on or before that date:
//!
//! - **`API_COUNT`**: number of web interfaces each release exposes
//! - **`BROWSER_SPECIFIC`**: compat rows supported by the release and by no other browser
//! - **`LONE_OMISSION`**: compat rows every other browser supports but the release lacks
//! - **`LONE_REMOVAL`**: interfaces the release dropped relative to its predecessor on the
//!   same OS while every other browser still exposes them

mod api_count;
mod browser_specific;
mod common;
mod computer;
mod lone_omission;
mod lone_removal;
mod metric_kind;
mod registry;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod test_support;

pub use api_count::ApiCountComputer;
pub use browser_specific::BrowserSpecificComputer;
pub use computer::MetricComputer;
pub use lone_omission::LoneOmissionComputer;
pub use lone_removal::LoneRemovalComputer;
pub use metric_kind::MetricKind;
pub use registry::{RegistryEntry, entries, resolve};
