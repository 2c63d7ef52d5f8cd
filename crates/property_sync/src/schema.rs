//! Declared configuration and its validation.
//!
//! [`CustomPropertyConfig`] is the configuration block as a user writes it.
//! [`CustomPropertyConfig::validate`] checks the fixed-choice attributes and
//! produces the typed [`ResourceData`] the synchronizer works with.
//! [`resource_schema`] describes each attribute for documentation output.

use serde::{Deserialize, Serialize};

use crate::errors::{PropertyError, PropertyResult};
use crate::resource_data::ResourceData;
use crate::resource_id::ID_SEPARATOR;
use crate::types::{ValueType, ValuesEditableBy};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Resource type name used in documentation and plan output.
pub const RESOURCE_TYPE: &str = "github_organization_custom_property";

/// A custom property declaration as written in a configuration file.
///
/// # Example TOML
///
/// ```toml
/// [[custom_properties]]
/// name = "environment"
/// value_type = "single_select"
/// required = true
/// default_value = "production"
/// description = "Prod or dev environment"
/// allowed_values = ["production", "development"]
/// values_editable_by = "org_actors"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomPropertyConfig {
    pub name: String,

    pub value_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,

    #[serde(default = "default_values_editable_by")]
    pub values_editable_by: String,
}

fn default_values_editable_by() -> String {
    ValuesEditableBy::default().as_str().to_string()
}

impl CustomPropertyConfig {
    /// Validates the declaration and converts it into an untracked [`ResourceData`].
    ///
    /// Only attribute-level checks happen here. Whether `allowed_values` fits
    /// the value type is decided by the synchronizer, because creating and
    /// updating treat it differently.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::Validation` if the name is empty or contains the
    /// identifier separator, or if `value_type` or `values_editable_by` is not
    /// one of the accepted values.
    pub fn validate(&self) -> PropertyResult<ResourceData> {
        if self.name.is_empty() {
            return Err(PropertyError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        if self.name.contains(ID_SEPARATOR) {
            return Err(PropertyError::Validation(format!(
                "name {:?} must not contain {:?}",
                self.name, ID_SEPARATOR
            )));
        }

        let value_type: ValueType = self.value_type.parse()?;
        let values_editable_by: ValuesEditableBy = self.values_editable_by.parse()?;

        let mut data = ResourceData::new(self.name.clone(), value_type);
        data.required = self.required;
        data.default_value = self.default_value.clone();
        data.description = self.description.clone();
        data.allowed_values = self.allowed_values.clone();
        data.values_editable_by = values_editable_by;
        Ok(data)
    }
}

impl From<&ResourceData> for CustomPropertyConfig {
    fn from(data: &ResourceData) -> Self {
        Self {
            name: data.name.clone(),
            value_type: data.value_type.to_string(),
            required: data.required,
            default_value: data.default_value.clone(),
            description: data.description.clone(),
            allowed_values: data.allowed_values.clone(),
            values_editable_by: data.values_editable_by.to_string(),
        }
    }
}

/// The type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    StringList,
}

/// Description of one attribute of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub attribute_type: AttributeType,
    pub required: bool,
    /// Changing the attribute destroys and recreates the property.
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub description: &'static str,
}

/// Describes every attribute of the custom property resource.
pub fn resource_schema() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema {
            name: "name",
            attribute_type: AttributeType::String,
            required: true,
            force_new: true,
            default: None,
            description: "Name of the custom property.",
        },
        AttributeSchema {
            name: "value_type",
            attribute_type: AttributeType::String,
            required: true,
            force_new: true,
            default: None,
            description: "The type of the value for the property. Can be one of: single_select, multi_select, string, true_false.",
        },
        AttributeSchema {
            name: "required",
            attribute_type: AttributeType::Bool,
            required: false,
            force_new: false,
            default: Some("false"),
            description: "Whether the property is required.",
        },
        AttributeSchema {
            name: "default_value",
            attribute_type: AttributeType::String,
            required: false,
            force_new: false,
            default: None,
            description: "Default value of the property.",
        },
        AttributeSchema {
            name: "description",
            attribute_type: AttributeType::String,
            required: false,
            force_new: false,
            default: None,
            description: "A short description of the property.",
        },
        AttributeSchema {
            name: "allowed_values",
            attribute_type: AttributeType::StringList,
            required: false,
            force_new: false,
            default: None,
            description: "List of allowed values for the property. Only applies when value_type is single_select or multi_select.",
        },
        AttributeSchema {
            name: "values_editable_by",
            attribute_type: AttributeType::String,
            required: false,
            force_new: false,
            default: Some("org_actors"),
            description: "Who can edit the values of the property. Can be one of: org_actors, org_and_repo_actors.",
        },
    ]
}
