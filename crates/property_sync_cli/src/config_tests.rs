use super::*;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, content).expect("Failed to write test config");
    path
}

#[test]
fn test_load_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[provider]
owner = "acme"

[[custom_properties]]
name = "environment"
value_type = "single_select"
required = true
default_value = "production"
description = "Prod or dev environment"
allowed_values = ["production", "development"]
values_editable_by = "org_and_repo_actors"

[[custom_properties]]
name = "team"
value_type = "string"
"#,
    );

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.provider.owner, "acme");
    assert_eq!(config.provider.token_env, DEFAULT_TOKEN_ENV);
    assert_eq!(config.provider.base_uri, None);
    assert_eq!(config.custom_properties.len(), 2);
    assert_eq!(config.custom_properties[0].name, "environment");
    assert_eq!(
        config.custom_properties[0].allowed_values,
        vec!["production".to_string(), "development".to_string()]
    );
    assert_eq!(config.custom_properties[1].values_editable_by, "org_actors");
}

#[test]
fn test_load_nonexistent_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");

    let result = AppConfig::load(&path);

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Configuration file not found"));
}

#[test]
fn test_load_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "invalid toml content [[[");

    let result = AppConfig::load(&path);

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse configuration file"));
}

#[test]
fn test_load_rejects_unknown_property_field() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[provider]
owner = "acme"

[[custom_properties]]
name = "team"
value_type = "string"
colour = "blue"
"#,
    );

    let err = AppConfig::load(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to parse configuration file"));
}

#[test]
fn test_load_with_custom_token_env_and_base_uri() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[provider]
owner = "acme"
token_env = "ACME_GITHUB_TOKEN"
base_uri = "https://github.example.com/api/v3"
"#,
    );

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.provider.token_env, "ACME_GITHUB_TOKEN");
    assert_eq!(
        config.provider.base_uri.as_deref(),
        Some("https://github.example.com/api/v3")
    );
    assert!(config.custom_properties.is_empty());
}

#[test]
fn test_validate_rejects_empty_owner() {
    let config = AppConfig {
        provider: ProviderConfig {
            owner: "  ".to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            base_uri: None,
        },
        custom_properties: vec![],
    };

    let err = config.validate().unwrap_err();

    assert_eq!(
        err.to_string(),
        "Configuration error: provider.owner must not be empty"
    );
}

#[test]
fn test_validate_rejects_invalid_base_uri() {
    let config = AppConfig {
        provider: ProviderConfig {
            owner: "acme".to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            base_uri: Some("not a url".to_string()),
        },
        custom_properties: vec![],
    };

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("provider.base_uri"));
}

#[test]
fn test_validate_rejects_duplicate_names() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[provider]
owner = "acme"

[[custom_properties]]
name = "team"
value_type = "string"

[[custom_properties]]
name = "team"
value_type = "true_false"
"#,
    );

    let err = AppConfig::load(&path).unwrap_err();

    assert!(err.to_string().contains("declared more than once"));
}

#[test]
fn test_validate_rejects_unknown_value_type() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[provider]
owner = "acme"

[[custom_properties]]
name = "team"
value_type = "number"
"#,
    );

    let err = AppConfig::load(&path).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("custom property \"team\""));
    assert!(message.contains("value_type"));
}

#[test]
fn test_desired_properties_preserve_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[provider]
owner = "acme"

[[custom_properties]]
name = "team"
value_type = "string"

[[custom_properties]]
name = "archived"
value_type = "true_false"
default_value = "false"
"#,
    );

    let config = AppConfig::load(&path).unwrap();
    let desired = config.desired_properties().unwrap();

    assert_eq!(desired.len(), 2);
    assert_eq!(desired[0].name, "team");
    assert_eq!(desired[1].name, "archived");
    assert_eq!(desired[1].default_value.as_deref(), Some("false"));
    assert!(!desired[1].is_tracked());
}
