//! Tests for declaration validation and the resource schema.

use super::*;

fn config(name: &str, value_type: &str) -> CustomPropertyConfig {
    CustomPropertyConfig {
        name: name.to_string(),
        value_type: value_type.to_string(),
        required: false,
        default_value: None,
        description: None,
        allowed_values: Vec::new(),
        values_editable_by: "org_actors".to_string(),
    }
}

#[test]
fn test_validate_converts_all_attributes() {
    let declared = CustomPropertyConfig {
        required: true,
        default_value: Some("production".to_string()),
        description: Some("Prod or dev environment".to_string()),
        allowed_values: vec!["production".to_string(), "development".to_string()],
        ..config("environment_x", "single_select")
    };

    let data = declared.validate().unwrap();

    assert_eq!(data.name, "environment_x");
    assert_eq!(data.value_type, ValueType::SingleSelect);
    assert!(data.required);
    assert_eq!(data.default_value.as_deref(), Some("production"));
    assert_eq!(data.description.as_deref(), Some("Prod or dev environment"));
    assert_eq!(data.allowed_values, vec!["production", "development"]);
    assert_eq!(data.values_editable_by, ValuesEditableBy::OrgActors);
    assert!(!data.is_tracked());
}

#[test]
fn test_validate_rejects_unknown_value_type() {
    let err = config("owner", "text").validate().unwrap_err();

    assert!(matches!(err, PropertyError::Validation(_)));
    assert!(err.to_string().starts_with("expected value_type to be one of"));
}

#[test]
fn test_validate_rejects_unknown_values_editable_by() {
    let declared = CustomPropertyConfig {
        values_editable_by: "repo_actors".to_string(),
        ..config("owner", "string")
    };

    let err = declared.validate().unwrap_err();

    assert!(err
        .to_string()
        .starts_with("expected values_editable_by to be one of"));
}

#[test]
fn test_validate_rejects_empty_name() {
    assert!(config("", "string").validate().is_err());
}

#[test]
fn test_validate_rejects_separator_in_name() {
    let err = config("team:owner", "string").validate().unwrap_err();

    assert_eq!(err.to_string(), "name \"team:owner\" must not contain ':'");
}

#[test]
fn test_validate_leaves_allowed_values_to_the_synchronizer() {
    let declared = CustomPropertyConfig {
        allowed_values: vec!["a".to_string()],
        ..config("owner", "string")
    };

    let data = declared.validate().unwrap();

    assert_eq!(data.allowed_values, vec!["a"]);
}

#[test]
fn test_declaration_defaults() {
    let declared: CustomPropertyConfig = parse_declaration(
        r#"{"name": "owner", "value_type": "string"}"#,
    );

    assert!(!declared.required);
    assert_eq!(declared.values_editable_by, "org_actors");
    assert!(declared.allowed_values.is_empty());
}

#[test]
fn test_unknown_fields_are_rejected() {
    let result: Result<CustomPropertyConfig, _> = serde_json::from_str(
        r#"{"name": "owner", "value_type": "string", "colour": "red"}"#,
    );

    assert!(result.is_err());
}

#[test]
fn test_config_from_resource_data_round_trips() {
    let declared = CustomPropertyConfig {
        required: true,
        allowed_values: vec!["frontend".to_string(), "backend".to_string()],
        values_editable_by: "org_and_repo_actors".to_string(),
        ..config("tags", "multi_select")
    };

    let data = declared.validate().unwrap();

    assert_eq!(CustomPropertyConfig::from(&data), declared);
}

#[test]
fn test_resource_schema_force_new_attributes() {
    let schema = resource_schema();

    let force_new: Vec<&str> = schema
        .iter()
        .filter(|a| a.force_new)
        .map(|a| a.name)
        .collect();
    assert_eq!(force_new, vec!["name", "value_type"]);

    let required: Vec<&str> = schema
        .iter()
        .filter(|a| a.required)
        .map(|a| a.name)
        .collect();
    assert_eq!(required, vec!["name", "value_type"]);
}

#[test]
fn test_resource_schema_defaults() {
    let schema = resource_schema();
    let default_of = |name: &str| {
        schema
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.default)
    };

    assert_eq!(default_of("required"), Some("false"));
    assert_eq!(default_of("values_editable_by"), Some("org_actors"));
    assert_eq!(default_of("default_value"), None);
}

fn parse_declaration(json: &str) -> CustomPropertyConfig {
    serde_json::from_str(json).expect("Failed to parse declaration")
}
