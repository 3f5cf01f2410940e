//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::network::filter::{FilterChain, LoopbackFilter, NameRegexFilter};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// How device information is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text rendering.
    #[default]
    Text,
    /// A JSON array of device reports.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Devices named on the command line; empty means "enumerate".
    pub devices: Vec<String>,

    /// Filter applied when enumerating devices
    pub filter: FilterChain,

    /// Output format
    pub format: OutputFormat,

    /// Single attribute to print instead of the full report
    pub attribute: Option<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let devices = if self.devices.is_empty() {
            "all".to_string()
        } else {
            self.devices.join(",")
        };

        write!(
            f,
            "Config {{ devices: {}, format: {}, attribute: {}, filters: +{}/-{} }}",
            devices,
            self.format,
            self.attribute.as_deref().unwrap_or("none"),
            self.filter.include_count(),
            self.filter.exclude_count(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - The TOML output format is unknown
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let filter = Self::build_filter(cli, toml)?;
        let format = Self::resolve_format(cli, toml)?;

        Ok(Self {
            devices: cli.devices.clone(),
            filter,
            format,
            attribute: cli.attribute.clone(),
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// If `cli.config` is set, that file must exist. Otherwise the file at
    /// [`default_config_path`] is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_fallback(cli, default_config_path().as_deref())
    }

    /// Like [`load`](Self::load), with an explicit fallback path.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_fallback(cli: &Cli, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else if let Some(path) = fallback.filter(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "Using default config file");
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        let mut filter = FilterChain::new();

        // Skip loopback if CLI flag or TOML setting
        let skip_loopback = cli.skip_loopback || toml.is_some_and(|t| t.devices.skip_loopback);
        if skip_loopback {
            filter = filter.exclude(LoopbackFilter);
        }

        // CLI patterns replace TOML patterns, per list
        let include = match toml {
            Some(t) if cli.include.is_empty() => &t.devices.include,
            _ => &cli.include,
        };
        for pattern in include {
            filter = filter.include(compile(pattern)?);
        }

        let exclude = match toml {
            Some(t) if cli.exclude.is_empty() => &t.devices.exclude,
            _ => &cli.exclude,
        };
        for pattern in exclude {
            filter = filter.exclude(compile(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(format) = cli.format {
            return Ok(format.into());
        }

        let value = toml
            .and_then(|t| t.output.format.as_deref())
            .unwrap_or(defaults::FORMAT);
        parse_format(value)
    }
}

/// Path of the config file used when `--config` is not given.
///
/// Returns `None` if the platform has no config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn compile(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

fn parse_format(s: &str) -> Result<OutputFormat, ConfigError> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(ConfigError::InvalidFormat {
            value: s.to_string(),
        }),
    }
}
