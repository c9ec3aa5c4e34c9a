use super::common::{CommonArgs, init_logging};
use super::{Host, Result};
use crate::date::parse_date;
use crate::metrics::MetricKind;
use crate::model::Release;
use crate::service::MetricComputerService;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use clap::Parser;
use ohno::{IntoAppError, app_err};
use std::collections::{HashMap, HashSet};
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ComputeArgs {
    /// Metric to compute, e.g. `API_COUNT` or `lone-removal`
    #[arg(long, short = 'k', value_name = "KIND")]
    pub kind: MetricKind,

    /// Evaluation date (`YYYY-MM-DD` or RFC 3339)
    #[arg(long, short = 'd', value_name = "DATE")]
    pub date: String,

    /// Release ids to compute for; defaults to the latest release of every browser and OS as of the date
    #[arg(long = "release", short = 'r', value_name = "ID")]
    pub releases: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn compute_metric<H: Host>(host: &mut H, args: &ComputeArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let service = args.common.service(Utf8Path::new("."))?;
    let date = parse_date(&args.date).ok_or_else(|| app_err!("invalid date: '{}'", args.date))?;

    let releases = select_releases(&service, &args.releases, date).await?;
    let mut records = service
        .compute(args.kind, &releases, &args.date)
        .await
        .into_app_err_with(|| format!("computing {}", args.kind))?;

    records.sort_by(|a, b| a.id().cmp(b.id()));

    let mut out = host.output();
    serde_json::to_writer_pretty(&mut out, &records).into_app_err("writing output records")?;
    writeln!(out).into_app_err("writing output records")?;

    Ok(())
}

/// Resolve the releases a run is about.
///
/// Named ids are looked up in the scoped release store; ids outside the scope are skipped
/// with a warning. Without ids, the latest release of each browser and OS pair shipped by
/// `date` is used.
async fn select_releases(service: &MetricComputerService, ids: &[String], date: DateTime<Utc>) -> Result<Vec<Release>> {
    let scoped = service
        .release_store()
        .await
        .into_app_err("loading releases")?
        .select()
        .into_app_err("querying releases")?;

    if ids.is_empty() {
        return Ok(latest_per_platform(scoped, date));
    }

    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let selected: Vec<_> = scoped.into_iter().filter(|r| wanted.contains(r.id.as_str())).collect();

    let found: HashSet<&str> = selected.iter().map(|r| r.id.as_str()).collect();
    for id in ids.iter().filter(|id| !found.contains(id.as_str())) {
        log::warn!("Release '{id}' is unknown or outside the configured scope, skipping");
    }

    Ok(selected)
}

fn latest_per_platform(releases: Vec<Release>, date: DateTime<Utc>) -> Vec<Release> {
    let mut latest: HashMap<(String, String), Release> = HashMap::new();

    for release in releases.into_iter().filter(|r| r.release_date <= date) {
        let key = (release.browser_name.clone(), release.os_name.clone());
        match latest.get(&key) {
            Some(current) if current.release_date >= release.release_date => {}
            _ => {
                let _ = latest.insert(key, release);
            }
        }
    }

    latest.into_values().collect()
}
