use super::Host;
use super::common::{ColorMode, ConsoleSection, LogLevel, OutputFormat, console_mode, init_logging};
use super::config::Config;
use crate::Result;
use crate::reports::{generate_console, generate_json};
use crate::summary::{ScrapeSummary, summarize_scrape, try_summarize_scrape};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use ohno::IntoAppError;
use std::fs;
use std::io::{Read, Write};

/// Options controlling how a scrape is read and rendered
#[derive(Args, Debug, Default)]
pub struct SummarizeArgs {
    /// Read the exposition payload from a file instead of standard input
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    /// Output format [default: terminal]
    #[arg(long, short = 'o', visible_alias = "output", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Control when to use colored output [default: auto]
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Terminal sections to print [default: summary,metrics]
    #[arg(long, value_name = "SECTIONS", value_delimiter = ',', num_args = 1..)]
    pub sections: Option<Vec<ConsoleSection>>,

    /// Fail if the payload is not valid text exposition instead of reporting its size only
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file (default is `promsum.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Read a scrape, summarize it, and write the rendered summary to the host's output
///
/// # Errors
///
/// Returns an error if the configuration or payload cannot be read, if the payload
/// cannot be decoded in strict mode, or if the output cannot be written
pub fn summarize<H: Host>(host: &mut H, args: &SummarizeArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let data = read_payload(host, args.input.as_deref())?;

    log::debug!("read {} bytes of exposition payload", data.len());

    let summary = if args.strict || config.strict {
        match try_summarize_scrape(&data) {
            Ok(summary) => summary,
            Err(e) => {
                let _ = writeln!(host.error(), "Unable to decode exposition payload: {e}");
                host.exit(1);
                return Err(e);
            }
        }
    } else {
        summarize_scrape(&data)
    };

    let rendered = render(&summary, args, &config)?;
    host.output()
        .write_all(rendered.as_bytes())
        .into_app_err("writing summary to output")?;

    Ok(())
}

fn read_payload<H: Host>(host: &mut H, input: Option<&Utf8Path>) -> Result<Vec<u8>> {
    if let Some(path) = input {
        return fs::read(path).into_app_err_with(|| format!("reading exposition payload from '{path}'"));
    }

    let mut data = Vec::new();
    let _ = host
        .input()
        .read_to_end(&mut data)
        .into_app_err("reading exposition payload from standard input")?;

    Ok(data)
}

fn render(summary: &ScrapeSummary, args: &SummarizeArgs, config: &Config) -> Result<String> {
    let mut output = String::new();

    match args.format.unwrap_or(config.format) {
        OutputFormat::Json => generate_json(summary, &mut output)?,
        OutputFormat::Terminal => {
            let sections = args.sections.as_deref().unwrap_or(&config.sections);
            let use_colors = args.color.unwrap_or(config.color).use_colors();
            generate_console(summary, use_colors, &console_mode(sections), &mut output)?;
        }
    }

    Ok(output)
}
