//! Tests for device filter configuration.

use crate::network::DeviceEntry;
use crate::network::filter::DeviceFilter;

use super::*;

fn device(name: &str) -> DeviceEntry {
    DeviceEntry::new(name, false)
}

fn loopback(name: &str) -> DeviceEntry {
    DeviceEntry::new(name, true)
}

mod filter_building {
    use super::*;

    #[test]
    fn default_filter_accepts_everything() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert!(config.filter.is_empty());
        assert!(config.filter.matches(&device("eth0")));
        assert!(config.filter.matches(&loopback("lo")));
    }

    #[test]
    fn skip_loopback_excludes_loopback() {
        let config = ValidatedConfig::from_raw(&cli(&["--skip-loopback"]), None).unwrap();

        assert_eq!(config.filter.exclude_count(), 1);
        assert!(!config.filter.matches(&loopback("lo")));
        assert!(config.filter.matches(&device("eth0")));
    }

    #[test]
    fn include_patterns_use_or_semantics() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--include", "^eth", "--include", "^wl"]), None)
                .unwrap();

        assert_eq!(config.filter.include_count(), 2);
        assert!(config.filter.matches(&device("eth0")));
        assert!(config.filter.matches(&device("wlp3s0")));
        assert!(!config.filter.matches(&device("docker0")));
    }

    #[test]
    fn exclude_wins_over_include() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--include", "^e", "--exclude", "^enx"]),
            None,
        )
        .unwrap();

        assert!(config.filter.matches(&device("eth0")));
        assert!(!config.filter.matches(&device("enx00e04c680001")));
    }

    #[test]
    fn toml_patterns_are_used_without_cli_patterns() {
        let toml = toml(
            r#"
            [devices]
            include = ["^eth"]
            exclude = ["^eth9"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert_eq!(config.filter.exclude_count(), 1);
        assert!(config.filter.matches(&device("eth0")));
        assert!(!config.filter.matches(&device("eth9")));
    }
}

mod invalid_patterns {
    use super::*;

    #[test]
    fn invalid_cli_include_regex() {
        let result = ValidatedConfig::from_raw(&cli(&["--include", "[unclosed"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegex { ref pattern, .. }) if pattern == "[unclosed"
        ));
    }

    #[test]
    fn invalid_toml_exclude_regex() {
        let toml = toml(
            r#"
            [devices]
            exclude = ["(bad"]
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegex { ref pattern, .. }) if pattern == "(bad"
        ));
    }

    #[test]
    fn invalid_toml_pattern_is_ignored_when_cli_replaces_it() {
        let toml = toml(
            r#"
            [devices]
            include = ["(bad"]
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&["--include", "^eth"]), Some(&toml));

        assert!(result.is_ok());
    }
}
