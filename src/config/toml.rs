//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Device selection section
    #[serde(default)]
    pub devices: DevicesSection,

    /// Output section
    #[serde(default)]
    pub output: OutputSection,
}

/// Device selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevicesSection {
    /// Regex patterns for devices to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for devices to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Skip loopback devices
    #[serde(default)]
    pub skip_loopback: bool,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "text" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# etherinfo configuration file
#
# Loaded from --config, or from <config dir>/etherinfo/config.toml when present.

[devices]
# Regex patterns for devices to include (empty = all)
# Note: CLI --include patterns REPLACE these entirely (not merged)
# include = ["^eth", "^en", "^wl"]

# Regex patterns for devices to exclude
# Note: CLI --exclude patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth", "^br-"]

# Skip loopback devices
skip_loopback = true

[output]
# Output format: "text" or "json" (default: text)
# format = "text"
"#
    .to_string()
}
