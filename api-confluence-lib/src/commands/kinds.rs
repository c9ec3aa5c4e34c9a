use super::{Host, Result};
use crate::metrics::entries;
use ohno::IntoAppError;
use std::io::Write;

/// Print every metric kind with the store it writes to.
pub fn list_kinds<H: Host>(host: &mut H) -> Result<()> {
    let mut out = host.output();

    for entry in entries() {
        writeln!(out, "{:<18} {:<20} {}", entry.kind.to_string(), entry.output_store.to_string(), entry.description)
            .into_app_err("writing metric kinds")?;
    }

    Ok(())
}
