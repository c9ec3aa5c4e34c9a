//! Shared command-line plumbing: logging setup and service construction.

use super::Result;
use super::config::Config;
use crate::service::MetricComputerService;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by commands that read the configuration and input data
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `confluence.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding the input record files, overriding the configuration
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Load the configuration and build a service from it.
    pub fn service(&self, root: &Utf8Path) -> Result<MetricComputerService> {
        let config = Config::load(root, self.config.as_ref())?;
        let data_dir = self.data_dir.clone().unwrap_or(config.data_dir);

        log::debug!("Reading input data from '{data_dir}'");

        MetricComputerService::builder()
            .scope(config.scope)
            .data_dir(data_dir)
            .build()
            .into_app_err("creating the metric service")
    }
}

pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
