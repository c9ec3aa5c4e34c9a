//! Command dispatch logic for api-confluence

use super::{ComputeArgs, Host, Result, ValidateArgs, compute_metric, list_kinds, validate_config};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "api-confluence", author, version, long_about = None)]
#[command(about = "Compute web API confluence metrics over browser release data")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one metric and print the resulting records as JSON
    Compute(Box<ComputeArgs>),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// List the available metric kinds
    Kinds,
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match Cli::parse_from(args).command {
        Command::Compute(compute_args) => compute_metric(host, &compute_args).await,
        Command::Validate(validate_args) => validate_config(host, &validate_args),
        Command::Kinds => list_kinds(host),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_compute_args() {
        let cli = Cli::parse_from([
            "api-confluence",
            "compute",
            "--kind",
            "lone-removal",
            "--date",
            "2017-06-01",
            "-r",
            "a",
            "-r",
            "b",
        ]);

        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.kind, crate::metrics::MetricKind::LoneRemoval);
        assert_eq!(args.releases, vec!["a".to_string(), "b".to_string()]);
        assert!(args.common.data_dir.is_none());
    }

    #[tokio::test]
    async fn test_kinds_command() {
        let mut host = TestHost::new();
        run(&mut host, ["api-confluence", "kinds"]).await.unwrap();
        assert!(host.output_text().contains("BROWSER_SPECIFIC"));
    }
}
