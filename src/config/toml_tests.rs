//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.devices.include.is_empty());
        assert!(config.devices.exclude.is_empty());
        assert!(!config.devices.skip_loopback);
        assert!(config.output.format.is_none());
    }

    #[test]
    fn parse_devices_section() {
        let toml = r#"
            [devices]
            include = ["^eth", "^en"]
            exclude = ["^docker"]
            skip_loopback = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.devices.include, vec!["^eth", "^en"]);
        assert_eq!(config.devices.exclude, vec!["^docker"]);
        assert!(config.devices.skip_loopback);
    }

    #[test]
    fn parse_output_section() {
        let toml = r#"
            [output]
            format = "json"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r"
            [daemon]
            interval = 60
        ";

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r"
            [devices]
            exclude_virtual = true
        ";

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r#"
            [devices]
            include = "^eth"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.devices.skip_loopback);
        assert!(config.devices.include.is_empty());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn template_documents_every_section() {
        let template = default_config_template();

        assert!(template.contains("[devices]"));
        assert!(template.contains("[output]"));
        assert!(template.contains("include"));
        assert!(template.contains("exclude"));
        assert!(template.contains("format"));
    }
}
