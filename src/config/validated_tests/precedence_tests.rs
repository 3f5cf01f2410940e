//! Tests for CLI > TOML > default precedence.

use super::*;

mod format {
    use super::*;

    #[test]
    fn default_is_text() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn toml_format_is_used() {
        let toml = toml(
            r#"
            [output]
            format = "json"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn toml_format_is_case_insensitive() {
        let toml = toml(
            r#"
            [output]
            format = "JSON"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn cli_format_overrides_toml() {
        let toml = toml(
            r#"
            [output]
            format = "json"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--format", "text"]), Some(&toml)).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn unknown_toml_format_is_rejected() {
        let toml = toml(
            r#"
            [output]
            format = "yaml"
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidFormat { ref value }) if value == "yaml"
        ));
    }
}

mod patterns {
    use super::*;

    #[test]
    fn cli_include_replaces_toml_include_only() {
        let toml = toml(
            r#"
            [devices]
            include = ["^eth", "^en"]
            exclude = ["^docker"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--include", "^wl"]), Some(&toml)).unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert_eq!(config.filter.exclude_count(), 1);
    }

    #[test]
    fn cli_exclude_replaces_toml_exclude_only() {
        let toml = toml(
            r#"
            [devices]
            include = ["^eth"]
            exclude = ["^docker", "^veth"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--exclude", "^br-"]), Some(&toml)).unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert_eq!(config.filter.exclude_count(), 1);
    }
}

mod skip_loopback {
    use super::*;

    #[test]
    fn toml_true_cannot_be_disabled_by_cli() {
        let toml = toml(
            r"
            [devices]
            skip_loopback = true
        ",
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.filter.exclude_count(), 1);
    }

    #[test]
    fn cli_flag_enables_when_toml_false() {
        let toml = toml(
            r"
            [devices]
            skip_loopback = false
        ",
        );

        let config = ValidatedConfig::from_raw(&cli(&["--skip-loopback"]), Some(&toml)).unwrap();
        assert_eq!(config.filter.exclude_count(), 1);
    }
}

mod cli_only {
    use super::*;

    #[test]
    fn devices_attribute_and_verbose_come_from_cli() {
        let config =
            ValidatedConfig::from_raw(&cli(&["-v", "-a", "mac_address", "eth0", "lo"]), None)
                .unwrap();

        assert_eq!(config.devices, vec!["eth0", "lo"]);
        assert_eq!(config.attribute.as_deref(), Some("mac_address"));
        assert!(config.verbose);
    }

    #[test]
    fn display_summarizes_config() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--format", "json", "--include", "^eth", "--skip-loopback"]),
            None,
        )
        .unwrap();

        let text = config.to_string();

        assert!(text.contains("devices: all"));
        assert!(text.contains("format: json"));
        assert!(text.contains("attribute: none"));
        assert!(text.contains("filters: +1/-1"));
    }
}
