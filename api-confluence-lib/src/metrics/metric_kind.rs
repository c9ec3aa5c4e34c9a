use crate::Error;
use core::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};

/// The closed set of metrics the service can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    LoneRemoval,
    BrowserSpecific,
    LoneOmission,
    ApiCount,
}

impl FromStr for MetricKind {
    type Err = Error;

    /// Parses names like `API_COUNT`, `api_count` or `api-count`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                let known: Vec<_> = Self::iter().map(|k| k.to_string()).collect();
                Error::InvalidArgument(format!("unknown metric kind '{s}', expected one of {}", known.join(", ")))
            })
    }
}
