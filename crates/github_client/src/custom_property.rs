//! Organization custom property API types.
//!
//! This module defines the wire format used by GitHub's organization custom
//! property schema endpoints. The same structure is sent as the body of the
//! create-or-update call and returned, as a list, by the list call.
//!
//! See: https://docs.github.com/en/rest/orgs/custom-properties

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "custom_property_tests.rs"]
mod tests;

/// An organization-level custom property definition as exchanged with GitHub.
///
/// Enum-like fields (`value_type`, `values_editable_by`) are kept as strings on
/// the wire so that values GitHub adds in the future do not break listing an
/// organization's properties. Callers convert them into their own typed
/// representation.
///
/// # Examples
///
/// ```
/// use github_client::OrganizationCustomProperty;
///
/// let property = OrganizationCustomProperty {
///     property_name: Some("environment".to_string()),
///     value_type: "single_select".to_string(),
///     required: Some(true),
///     default_value: Some("production".to_string()),
///     allowed_values: Some(vec!["production".to_string(), "development".to_string()]),
///     ..Default::default()
/// };
///
/// let body = serde_json::to_value(&property).unwrap();
/// assert_eq!(body["value_type"], "single_select");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationCustomProperty {
    /// Name of the property. Always present in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,

    /// One of `single_select`, `multi_select`, `string`, `true_false`.
    pub value_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Default value. Multi-select properties report a list, which is joined
    /// with `,` when read.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_default_value"
    )]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered list of allowed values for select types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,

    /// One of `org_actors`, `org_and_repo_actors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_editable_by: Option<String>,

    /// Where the property is defined (`organization` or `enterprise`). Response only.
    #[serde(default, skip_serializing)]
    pub source_type: Option<String>,

    /// API URL of the property. Response only.
    #[serde(default, skip_serializing)]
    pub url: Option<String>,
}

impl OrganizationCustomProperty {
    /// Returns `true` when this entry describes the property with the given name.
    pub fn has_name(&self, name: &str) -> bool {
        self.property_name.as_deref() == Some(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefaultValueRepr {
    Single(String),
    Multiple(Vec<String>),
}

fn deserialize_default_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DefaultValueRepr>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        DefaultValueRepr::Single(s) => s,
        DefaultValueRepr::Multiple(values) => values.join(","),
    }))
}
