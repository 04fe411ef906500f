//! Command dispatch logic for promsum

use super::{SummarizeArgs, summarize};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "promsum", version, author, long_about = None)]
#[command(about = "Summarize a Prometheus text exposition scrape")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: SummarizeArgs,
}

/// Parse command-line arguments and summarize the scrape they describe
///
/// This function is designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the summarization fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    summarize(host, &cli.args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::{ColorMode, ConsoleSection, LogLevel, OutputFormat};
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_leave_config_in_charge() {
        let cli = Cli::parse_from(["promsum"]);
        assert!(cli.args.format.is_none());
        assert!(cli.args.color.is_none());
        assert!(cli.args.sections.is_none());
        assert!(cli.args.input.is_none());
        assert!(cli.args.config.is_none());
        assert!(!cli.args.strict);
        assert_eq!(cli.args.log_level, LogLevel::None);
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::parse_from([
            "promsum",
            "-o",
            "json",
            "-i",
            "scrape.txt",
            "--color",
            "always",
            "--sections",
            "metrics,summary",
            "--strict",
            "-c",
            "custom.toml",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.args.format, Some(OutputFormat::Json));
        assert_eq!(cli.args.input.as_deref().map(camino::Utf8Path::as_str), Some("scrape.txt"));
        assert_eq!(cli.args.color, Some(ColorMode::Always));
        assert_eq!(cli.args.sections, Some(vec![ConsoleSection::Metrics, ConsoleSection::Summary]));
        assert!(cli.args.strict);
        assert_eq!(cli.args.config.as_deref().map(camino::Utf8Path::as_str), Some("custom.toml"));
        assert_eq!(cli.args.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_output_alias() {
        let cli = Cli::parse_from(["promsum", "--output", "terminal"]);
        assert_eq!(cli.args.format, Some(OutputFormat::Terminal));

        let cli = Cli::parse_from(["promsum", "--format", "json"]);
        assert_eq!(cli.args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["promsum", "--format", "yaml"]).is_err());
    }
}
