//! Fixture helpers shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset of the helpers")]

use api_confluence_lib::model::{CompatData, Release, ReleaseWebInterfaceJunction, WebInterface};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 0, 0, 0).unwrap()
}

fn write_records<T: Serialize>(dir: &Path, kind: &str, records: &[T]) {
    let text = serde_json::to_string_pretty(records).unwrap();
    fs::write(dir.join(format!("{kind}.json")), text).unwrap();
}

/// A data directory holding one JSON file per input record type.
pub struct Fixture {
    pub dir: TempDir,
    pub releases: Vec<Release>,
}

impl Fixture {
    pub fn new(
        releases: Vec<Release>,
        web_interfaces: &[WebInterface],
        junctions: &[ReleaseWebInterfaceJunction],
        compat: &[CompatData],
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_records(dir.path(), "Release", &releases);
        write_records(dir.path(), "WebInterface", web_interfaces);
        write_records(dir.path(), "ReleaseWebInterfaceJunction", junctions);
        write_records(dir.path(), "CompatData", compat);
        Self { dir, releases }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Three releases of three browsers, each linked to exactly one of two interfaces.
pub fn three_browsers() -> Fixture {
    let chrome = Release::new("Chrome", "56", "Windows", "10.0", day(2017, 1, 25));
    let firefox = Release::new("Firefox", "52", "Windows", "10.0", day(2017, 3, 7));
    let edge = Release::new("Edge", "15", "Windows", "10.0", day(2017, 4, 5));

    let create = WebInterface::new("Document", "createElement");
    let fetch = WebInterface::new("Window", "fetch");

    let junctions = vec![
        ReleaseWebInterfaceJunction::new(&chrome.id, &create.id),
        ReleaseWebInterfaceJunction::new(&firefox.id, &fetch.id),
        ReleaseWebInterfaceJunction::new(&edge.id, &create.id),
    ];

    let compat = vec![
        CompatData::new("Document", "createElement")
            .with_support(&chrome.id, true)
            .with_support(&edge.id, true),
        CompatData::new("Window", "fetch").with_support(&firefox.id, true),
    ];

    Fixture::new(vec![chrome, firefox, edge], &[create, fetch], &junctions, &compat)
}
