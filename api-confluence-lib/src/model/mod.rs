//! Typed records for releases, web interfaces, and metric output
//!
//! Input records are read from camelCase JSON arrays, one file per record type, named after
//! [`Record::KIND`](crate::store::Record::KIND). Output records are produced by metric
//! computers and returned to callers as [`OutputRecord`] values.

mod compat_data;
mod junction;
mod output;
mod release;
mod web_interface;

pub use compat_data::CompatData;
pub use junction::ReleaseWebInterfaceJunction;
pub use output::{ApiCountData, BrowserMetricData, OutputRecord};
pub use release::Release;
pub use web_interface::WebInterface;
