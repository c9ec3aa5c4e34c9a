//! Orchestration of metric runs
//!
//! [`MetricComputerService`] is the entry point. A compute call parses its date, makes sure
//! the input stores are loaded, creates a [`ComputeContext`] with fresh output stores, hands
//! the scoped releases to the computer chosen through the metric registry, and reads back the
//! output store named by the registry entry.
//!
//! Input stores are loaded once per service through its [`StoreLoader`](crate::loader::StoreLoader)
//! and shared read-only between runs. The release store is exposed only through the
//! service's scope, and caller-supplied releases are filtered through the same scope, so a
//! computer never sees a release the scope excludes.

mod context;
mod metric_computer_service;

pub use context::{ComputeContext, InputStores, StoreName};
pub use metric_computer_service::{DEFAULT_DATA_DIR, MetricComputerService, MetricComputerServiceBuilder};
