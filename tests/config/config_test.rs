//! Coverage for configuration parsing and defaults.

use aerodesk::config::AerodeskConfig;

#[test]
fn defaults_apply_without_a_file() {
    let config = AerodeskConfig::default();
    assert_eq!(config.api.base_url, "http://localhost:8080/api");
    assert_eq!(config.api.page_size, 10);
    assert_eq!(config.console.log_level, "info");
}

#[test]
fn parse_minimal_toml() {
    let toml_str = r#"
[api]
base_url = "https://booking.example.com/api"
"#;
    let config = AerodeskConfig::from_toml(toml_str).expect("minimal config should parse");
    assert_eq!(config.api.base_url, "https://booking.example.com/api");
    // Unset sections fall back to defaults.
    assert_eq!(config.api.page_size, 10);
    assert_eq!(config.console.log_level, "info");
}

#[test]
fn parse_full_toml() {
    let toml_str = r#"
[api]
base_url = "http://10.0.0.5:8080/api"
page_size = 25

[console]
log_level = "debug"
"#;
    let config = AerodeskConfig::from_toml(toml_str).expect("full config should parse");
    assert_eq!(config.api.page_size, 25);
    assert_eq!(config.console.log_level, "debug");
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(AerodeskConfig::from_toml("[api\nbase_url = oops").is_err());
}
