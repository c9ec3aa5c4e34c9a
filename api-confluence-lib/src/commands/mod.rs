//! Command-line interface for api-confluence
//!
//! This module parses arguments, loads configuration, and drives the
//! [`MetricComputerService`](crate::service::MetricComputerService).
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **compute**: Build a service from the configuration, pick the releases to report on,
//!   run one metric, and print its output records as pretty JSON
//! - **validate**: Check configuration file syntax and that the release scope binds
//!   against the release schema
//! - **kinds**: List the metric kinds and the stores they write to
//!
//! Configuration is a TOML file (`confluence.toml` by default) holding the input data
//! directory and the release scope predicate. When no file is present, the embedded
//! `default_config.toml` applies.
//!
//! Errors at this layer are `ohno::AppError` values carrying context about which step failed.

mod common;
mod compute;
mod config;
mod host;
mod kinds;
mod run;
mod validate;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(debug_assertions)]
pub use config::Config;

pub use common::LogLevel;
pub use compute::{ComputeArgs, compute_metric};
pub use host::Host;
pub use kinds::list_kinds;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
