//! Default values for configuration options.

/// Default output format name.
pub const FORMAT: &str = "text";

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "etherinfo";

/// Config file name looked up when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "config.toml";
