#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for api-confluence
//!
//! This library loads browser release data into in-memory stores, scopes it, and runs
//! pluggable metric computers over it, one isolated run at a time.
//!
//! # Module Organization
//!
//! - [`store`]: Indexed in-memory record stores and predicates
//! - [`model`]: Release, web interface, compatibility, and output records
//! - [`loader`]: Single-flight loading of record files into stores
//! - [`metrics`]: Metric kinds, computers, and the registry binding them
//! - [`service`]: The orchestrator that runs a metric over scoped inputs
//! - [`commands`]: Command-line interface

pub type Result<T, E = Error> = core::result::Result<T, E>;

mod date;
mod error;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod loader;
pub mod metrics;
pub mod model;
pub mod service;
pub mod store;

pub use crate::commands::{Host, run};
pub use crate::date::parse_date;
pub use crate::error::{Cause, Error};
