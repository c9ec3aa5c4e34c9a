use super::Release;
use crate::metrics::MetricKind;
use crate::store::define_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_record! {
    /// A per-release browser metric as of a given date.
    BrowserMetricData => "BrowserMetricData" {
        id: String,
        /// The metric kind's display name, for example `LONE_REMOVAL`.
        metric: String,
        browser_name: String,
        release_id: String,
        date: DateTime<Utc>,
        value: u64,
    }
}

impl BrowserMetricData {
    #[must_use]
    pub fn new(metric: MetricKind, release: &Release, date: DateTime<Utc>, value: u64) -> Self {
        Self {
            id: format!("{metric}:{}", release.id),
            metric: metric.to_string(),
            browser_name: release.browser_name.clone(),
            release_id: release.id.clone(),
            date,
            value,
        }
    }
}

define_record! {
    /// The number of web interfaces a release exposes as of a given date.
    ApiCountData => "ApiCountData" {
        id: String,
        browser_name: String,
        release_id: String,
        date: DateTime<Utc>,
        total_apis: u64,
    }
}

impl ApiCountData {
    #[must_use]
    pub fn new(release: &Release, date: DateTime<Utc>, total_apis: u64) -> Self {
        Self {
            id: release.id.clone(),
            browser_name: release.browser_name.clone(),
            release_id: release.id.clone(),
            date,
            total_apis,
        }
    }
}

/// A record read back from a metric's output store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    BrowserMetric(BrowserMetricData),
    ApiCount(ApiCountData),
}

impl OutputRecord {
    #[must_use]
    pub fn release_id(&self) -> &str {
        match self {
            Self::BrowserMetric(m) => &m.release_id,
            Self::ApiCount(c) => &c.release_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::BrowserMetric(m) => &m.id,
            Self::ApiCount(c) => &c.id,
        }
    }
}

impl From<BrowserMetricData> for OutputRecord {
    fn from(value: BrowserMetricData) -> Self {
        Self::BrowserMetric(value)
    }
}

impl From<ApiCountData> for OutputRecord {
    fn from(value: ApiCountData) -> Self {
        Self::ApiCount(value)
    }
}
