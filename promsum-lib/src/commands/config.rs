use super::common::{ColorMode, ConsoleSection, OutputFormat};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const CONFIG_FILE_NAME: &str = "promsum.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How the summary is rendered
    #[serde(default)]
    pub format: OutputFormat,

    /// When to color terminal output
    #[serde(default)]
    pub color: ColorMode,

    /// Terminal sections to print
    #[serde(default = "default_sections")]
    pub sections: Vec<ConsoleSection>,

    /// Fail on payloads that cannot be decoded instead of reporting their size only
    #[serde(default)]
    pub strict: bool,
}

fn default_sections() -> Vec<ConsoleSection> {
    vec![ConsoleSection::Summary, ConsoleSection::Metrics]
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `promsum.toml` is looked up in `base_dir` and
    /// the defaults are used when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading promsum configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading promsum configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if no section is selected or a section is listed twice
    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(app_err!("sections must name at least one of 'summary' or 'metrics'"));
        }

        for (index, section) in self.sections.iter().enumerate() {
            if self.sections[..index].contains(section) {
                return Err(app_err!("section {section:?} is listed more than once"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
