//! Tests for configuration file loading and generation.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, tempdir};

use super::*;

mod config_load {
    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [devices]
            include = ["^eth"]

            [output]
            format = "json"
        "#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let config = ValidatedConfig::load_with_fallback(&cli, None).unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.filter.include_count(), 1);
    }

    #[test]
    fn load_without_any_config_file() {
        let cli = cli(&["--format", "json"]);
        let config = ValidatedConfig::load_with_fallback(&cli, None).unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.filter.is_empty());
    }

    #[test]
    fn load_nonexistent_config_file_returns_error() {
        let cli = cli(&["--config", "nonexistent_file_12345.toml"]);
        let result = ValidatedConfig::load_with_fallback(&cli, None);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[devices\ninclude = ").unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let result = ValidatedConfig::load_with_fallback(&cli, None);

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod fallback {
    use super::*;

    #[test]
    fn existing_fallback_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let config = ValidatedConfig::load_with_fallback(&cli(&[]), Some(path.as_path())).unwrap();

        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn missing_fallback_file_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = ValidatedConfig::load_with_fallback(&cli(&[]), Some(path.as_path())).unwrap();

        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn explicit_config_wins_over_fallback() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join("fallback.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&fallback, "[output]\nformat = \"json\"\n").unwrap();
        fs::write(&explicit, "[output]\nformat = \"text\"\n").unwrap();

        let cli = cli(&["--config", explicit.to_str().unwrap()]);
        let config = ValidatedConfig::load_with_fallback(&cli, Some(fallback.as_path())).unwrap();

        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn default_path_ends_with_crate_config() {
        if let Some(path) = super::super::super::default_config_path() {
            assert!(path.ends_with(Path::new("etherinfo").join("config.toml")));
        }
    }
}

mod write_config {
    use super::super::super::validated::write_default_config;
    use super::*;

    #[test]
    fn write_default_config_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test-config.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[devices]"));
        assert!(content.contains("[output]"));
    }

    #[test]
    fn written_template_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("etherinfo.toml");
        write_default_config(&path).unwrap();

        let cli = cli(&["--config", path.to_str().unwrap()]);
        let config = ValidatedConfig::load_with_fallback(&cli, None).unwrap();

        assert_eq!(config.filter.exclude_count(), 1);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn write_default_config_to_invalid_path_returns_error() {
        let path = Path::new("/nonexistent_dir_12345/config.toml");
        let result = write_default_config(path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
