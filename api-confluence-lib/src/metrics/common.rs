//! Helpers shared by the metric computers.

use crate::Result;
use crate::model::{CompatData, Release};
use crate::service::ComputeContext;
use crate::store::Predicate;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Releases that had shipped by `date`.
pub fn released_by(releases: &[Release], date: DateTime<Utc>) -> Vec<&Release> {
    releases.iter().filter(|r| r.release_date <= date).collect()
}

/// The considered releases belonging to a browser other than `release`'s.
pub fn other_browsers<'a>(release: &Release, considered: &[&'a Release]) -> Vec<&'a Release> {
    considered
        .iter()
        .copied()
        .filter(|other| other.browser_name != release.browser_name)
        .collect()
}

/// Ids of the web interfaces a release exposes, answered through the junction index.
pub fn interfaces_of(ctx: &ComputeContext, release_id: &str) -> Result<HashSet<String>> {
    Ok(ctx
        .junction_store()
        .filter(Predicate::eq("source_id", release_id))
        .select()?
        .into_iter()
        .map(|junction| junction.target_id)
        .collect())
}

pub fn compat_rows(ctx: &ComputeContext) -> Result<Vec<CompatData>> {
    ctx.compat_store().view().select()
}

pub fn as_count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_released_by_is_inclusive() {
        let day = Utc.with_ymd_and_hms(2017, 3, 1, 0, 0, 0).unwrap();
        let releases = vec![
            Release::new("Chrome", "56", "Windows", "10.0", day),
            Release::new("Chrome", "57", "Windows", "10.0", Utc.with_ymd_and_hms(2017, 3, 9, 0, 0, 0).unwrap()),
        ];

        let considered = released_by(&releases, day);
        assert_eq!(considered.len(), 1);
        assert_eq!(considered[0].browser_version, "56");
    }

    #[test]
    fn test_other_browsers_excludes_same_browser() {
        let day = Utc.with_ymd_and_hms(2017, 3, 1, 0, 0, 0).unwrap();
        let releases = vec![
            Release::new("Chrome", "56", "Windows", "10.0", day),
            Release::new("Chrome", "56", "macOS", "10.12", day),
            Release::new("Safari", "10", "macOS", "10.12", day),
        ];
        let considered: Vec<_> = releases.iter().collect();

        let others = other_browsers(&releases[0], &considered);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].browser_name, "Safari");
    }
}
