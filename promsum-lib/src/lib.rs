#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for promsum
//!
//! This library consolidates all functionality for the promsum tool, which reads a
//! Prometheus text exposition scrape and reports its size, cardinality, metric
//! types and label usage.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`exposition`]: Decoding of the text exposition format
//! - [`summary`]: Aggregation of decoded families into a scrape summary
//! - [`reports`]: Report generation in JSON and terminal formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod exposition;
#[cfg(not(any(debug_assertions, test)))]
mod exposition;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod summary;
#[cfg(not(any(debug_assertions, test)))]
mod summary;

pub use crate::commands::{Host, run};
