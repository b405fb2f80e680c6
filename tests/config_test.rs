use std::fs;
use tempfile::tempdir;

use claude_usage_tracker::config::Config;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.logging.level, "ERROR");
    assert_eq!(config.logging.format, "pretty");
    assert_eq!(config.logging.output, "console");

    assert_eq!(config.api.base_url, "https://api.anthropic.com/v1");
    assert_eq!(config.api.timeout_secs, 30);
    assert!(config.api.admin_api_key.is_none());

    assert_eq!(config.refresh.interval_minutes, 5);
    assert_eq!(config.refresh.default_timeframe, "today");
}

#[test]
fn test_config_file_loading() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("test-config.toml");

    let test_config = r#"
[logging]
level = "DEBUG"
format = "json"
output = "console"

[api]
base_url = "http://localhost:9999/v1"
timeout_secs = 5
admin_api_key = "sk-ant-admin-test"

[refresh]
interval_minutes = 1
default_timeframe = "7days"

[paths]
log_directory = "/custom/logs"
    "#;

    fs::write(&config_path, test_config).expect("Failed to write test config");

    let config = Config::load_from_file(&config_path).expect("Failed to load config");

    assert_eq!(config.logging.level, "DEBUG");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.api.base_url, "http://localhost:9999/v1");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.admin_api_key.as_deref(), Some("sk-ant-admin-test"));
    assert_eq!(config.refresh.interval_minutes, 1);
    assert_eq!(config.refresh.default_timeframe, "7days");
}

#[test]
fn test_config_serialization_round_trip() {
    let config = Config::default();

    let toml_string = toml::to_string_pretty(&config).expect("Failed to serialize to TOML");
    assert!(toml_string.contains("[logging]"));
    assert!(toml_string.contains("[api]"));
    assert!(toml_string.contains("[refresh]"));
    assert!(toml_string.contains("[paths]"));

    let deserialized: Config = toml::from_str(&toml_string).expect("Failed to deserialize TOML");
    assert_eq!(config.logging.level, deserialized.logging.level);
    assert_eq!(config.api.base_url, deserialized.api.base_url);
    assert_eq!(
        config.refresh.interval_minutes,
        deserialized.refresh.interval_minutes
    );
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("broken.toml");

    fs::write(&config_path, "this is not toml [").expect("Failed to write test config");
    assert!(Config::load_from_file(&config_path).is_err());
}
