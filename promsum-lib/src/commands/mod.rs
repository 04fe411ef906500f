//! Command-line interface and orchestration for promsum
//!
//! This module implements the command that reads a scrape, summarizes it, and
//! renders the result. It handles argument parsing, configuration management,
//! and the end-to-end workflow.
//!
//! # Implementation Model
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and hands them to
//! `summarize`, which:
//!
//! 1. Initializes logging from `--log-level`
//! 2. Loads the configuration file, falling back to built-in defaults
//! 3. Reads the payload from `--input` or the host's standard input
//! 4. Summarizes it, degrading to a size-only summary unless strict mode is on
//! 5. Renders JSON or terminal output and writes it to the host's output
//!
//! Command-line options take precedence over configuration values.
//!
//! All I/O goes through the [`Host`] trait so tests can drive the whole flow with
//! in-memory buffers.
//!
//! Configuration is managed through an optional `promsum.toml` file holding the
//! default output format, color mode, terminal sections and strictness.

mod common;
mod config;
mod host;
mod run;
mod summarize;

#[cfg(debug_assertions)]
pub use config::Config;

pub use common::{ColorMode, ConsoleSection, LogLevel, OutputFormat};
pub use host::Host;
pub use run::run;
pub use summarize::{SummarizeArgs, summarize};
