//! Drives the `compute`, `validate`, and `kinds` commands through `run`.

mod common;

use api_confluence_lib::Host;
use common::{Fixture, three_browsers};
use serde_json::Value;
use std::path::PathBuf;

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn write_config(fixture: &Fixture, text: &str) -> String {
    let path: PathBuf = fixture.path().join("confluence.toml");
    std::fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

fn data_dir(fixture: &Fixture) -> String {
    fixture.path().to_string_lossy().into_owned()
}

fn parse_records(host: &TestHost) -> Vec<Value> {
    let value: Value = serde_json::from_str(&host.output_str()).unwrap();
    value.as_array().unwrap().clone()
}

#[tokio::test]
async fn test_compute_api_count_for_latest_releases() {
    let fixture = three_browsers();
    let config = write_config(&fixture, "scope = \"all\"\n");
    let data_dir = data_dir(&fixture);

    let mut host = TestHost::default();
    api_confluence_lib::run(
        &mut host,
        [
            "api-confluence",
            "compute",
            "--kind",
            "api-count",
            "--date",
            "2017-06-01",
            "--config",
            config.as_str(),
            "--data-dir",
            data_dir.as_str(),
        ],
    )
    .await
    .unwrap();

    let records = parse_records(&host);
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record["totalApis"], 1);
        assert_eq!(record["id"], record["releaseId"]);
    }

    let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap().to_string()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "records are printed in id order");
}

#[tokio::test]
async fn test_compute_for_named_release() {
    let fixture = three_browsers();
    let config = write_config(&fixture, "scope = \"all\"\n");
    let data_dir = data_dir(&fixture);
    let edge = fixture.releases.iter().find(|r| r.browser_name == "Edge").unwrap().id.clone();

    let mut host = TestHost::default();
    api_confluence_lib::run(
        &mut host,
        [
            "api-confluence",
            "compute",
            "-k",
            "BROWSER_SPECIFIC",
            "-d",
            "2017-06-01",
            "-r",
            edge.as_str(),
            "-r",
            "Netscape_4_Windows_95",
            "--config",
            config.as_str(),
            "--data-dir",
            data_dir.as_str(),
        ],
    )
    .await
    .unwrap();

    let records = parse_records(&host);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["releaseId"], edge.as_str());
    assert_eq!(records[0]["metric"], "BROWSER_SPECIFIC");
    assert_eq!(records[0]["id"], format!("BROWSER_SPECIFIC:{edge}"));
}

#[tokio::test]
async fn test_compute_respects_configured_scope() {
    let fixture = three_browsers();
    let config = write_config(
        &fixture,
        r#"
[scope.in]
field = "browser_name"
values = ["Firefox"]
"#,
    );
    let data_dir = data_dir(&fixture);

    let mut host = TestHost::default();
    api_confluence_lib::run(
        &mut host,
        [
            "api-confluence",
            "compute",
            "--kind",
            "lone-omission",
            "--date",
            "2017-06-01",
            "--config",
            config.as_str(),
            "--data-dir",
            data_dir.as_str(),
        ],
    )
    .await
    .unwrap();

    let records = parse_records(&host);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["browserName"], "Firefox");
}

#[tokio::test]
async fn test_compute_rejects_invalid_date() {
    let fixture = three_browsers();
    let config = write_config(&fixture, "scope = \"all\"\n");
    let data_dir = data_dir(&fixture);

    let mut host = TestHost::default();
    let result = api_confluence_lib::run(
        &mut host,
        [
            "api-confluence",
            "compute",
            "--kind",
            "api-count",
            "--date",
            "June 1st",
            "--config",
            config.as_str(),
            "--data-dir",
            data_dir.as_str(),
        ],
    )
    .await;

    let err = result.unwrap_err();
    assert!(format!("{err}").contains("invalid date"), "{err}");
    assert!(host.output_str().is_empty());
}

#[tokio::test]
async fn test_validate_reports_bad_scope() {
    let fixture = three_browsers();
    let config = write_config(&fixture, "[scope.eq]\nfield = \"vendor\"\nvalue = \"Apple\"\n");

    let mut host = TestHost::default();
    let result = api_confluence_lib::run(&mut host, ["api-confluence", "validate", "--config", config.as_str()]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("vendor"), "{}", host.error_str());
}

#[tokio::test]
async fn test_kinds_lists_every_metric() {
    let mut host = TestHost::default();
    api_confluence_lib::run(&mut host, ["api-confluence", "kinds"]).await.unwrap();

    let out = host.output_str();
    for kind in ["API_COUNT", "BROWSER_SPECIFIC", "LONE_OMISSION", "LONE_REMOVAL"] {
        assert!(out.contains(kind), "missing {kind} in {out}");
    }
}
