//! Configuration layer for etherinfo.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - `--config`, or the file at [`default_config_path`]
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For filter patterns (`include`, `exclude`), CLI patterns **replace**
//! TOML patterns entirely (not merged). Include and exclude lists are handled
//! independently: `--include` replaces only the TOML includes.
//!
//! # Boolean Flag Semantics
//!
//! `--skip-loopback` uses OR semantics: if set `true` in either CLI or TOML,
//! the result is `true`. The CLI cannot turn off a TOML `true`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, OutputFormatArg};
pub use error::ConfigError;
pub use toml::{DevicesSection, OutputSection, TomlConfig, default_config_template};
pub use validated::{
    OutputFormat, ValidatedConfig, default_config_path, write_default_config,
};
