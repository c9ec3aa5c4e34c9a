use crate::store::define_record;
use chrono::{DateTime, Utc};

define_record! {
    /// A single browser version shipped on one operating system version.
    Release => "Release" {
        id: String,
        browser_name: String,
        browser_version: String,
        os_name: String,
        os_version: String,
        release_date: DateTime<Utc>,
        #[serde(default)]
        is_mobile: bool,
    }
}

impl Release {
    /// Build a desktop release with an id derived from its identity fields.
    #[must_use]
    pub fn new(browser_name: &str, browser_version: &str, os_name: &str, os_version: &str, release_date: DateTime<Utc>) -> Self {
        Self {
            id: format!("{browser_name}_{browser_version}_{os_name}_{os_version}"),
            browser_name: browser_name.to_string(),
            browser_version: browser_version.to_string(),
            os_name: os_name.to_string(),
            os_version: os_version.to_string(),
            release_date,
            is_mobile: false,
        }
    }
}
