//! Report generation for scrape summaries
//!
//! This module renders a [`ScrapeSummary`](crate::summary::ScrapeSummary) for
//! human consumption or programmatic processing.
//!
//! # Implementation Model
//!
//! Two report generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal output with optional ANSI colors, split into a summary
//!   section and a per-metric section that can be selected independently
//! - **JSON**: Machine-readable structured data, pretty-printed
//!
//! Both generators write into any `core::fmt::Write`, leaving the choice of
//! destination to the caller.
//!
//! Common functionality is centralized in the `common` module:
//! - Byte formatting with binary units
//! - Pluralization of counted nouns
//! - Ordering of metric types and labels for display

mod common;
mod console;
mod json;

pub use common::format_bytes;
pub use console::{ConsoleOutputMode, generate as generate_console};
pub use json::generate as generate_json;
