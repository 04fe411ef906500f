//! Option types and process setup shared by the command layer.

use crate::reports::ConsoleOutputMode;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the summary is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document
    Json,

    /// Human-readable report
    #[default]
    Terminal,
}

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    #[default]
    Auto,
}

impl ColorMode {
    /// Decide whether colors are emitted on standard output.
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    #[default]
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

/// Individual sections that can be shown in terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleSection {
    /// Show the scrape-wide summary
    Summary,

    /// Show one entry per metric
    Metrics,
}

/// Translate a list of selected sections into a console mode.
#[must_use]
pub fn console_mode(sections: &[ConsoleSection]) -> ConsoleOutputMode {
    ConsoleOutputMode {
        summary: sections.contains(&ConsoleSection::Summary),
        metrics: sections.contains(&ConsoleSection::Metrics),
    }
}

/// Initialize logger based on log level
///
/// A logger that is already installed is left in place, so repeated runs within
/// one process keep the first configuration.
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

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_mode() {
        assert_eq!(
            console_mode(&[ConsoleSection::Summary, ConsoleSection::Metrics]),
            ConsoleOutputMode::full()
        );

        let mode = console_mode(&[ConsoleSection::Metrics]);
        assert!(!mode.summary);
        assert!(mode.metrics);

        let mode = console_mode(&[]);
        assert!(!mode.summary);
        assert!(!mode.metrics);
    }

    #[test]
    fn test_explicit_color_modes() {
        assert!(ColorMode::Always.use_colors());
        assert!(!ColorMode::Never.use_colors());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(OutputFormat::default(), OutputFormat::Terminal);
        assert_eq!(ColorMode::default(), ColorMode::Auto);
        assert_eq!(LogLevel::default(), LogLevel::None);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
        init_logging(LogLevel::None);
    }
}
