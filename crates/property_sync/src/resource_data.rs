//! Local record of a declared custom property.
//!
//! `ResourceData` carries both the declared attributes and the identifier of
//! the remote object once it has been created. An empty identifier means the
//! property is not tracked.

use serde::{Deserialize, Serialize};

use crate::types::{ValueType, ValuesEditableBy};

#[cfg(test)]
#[path = "resource_data_tests.rs"]
mod tests;

/// The attributes of one custom property plus its tracked identifier.
///
/// # Examples
///
/// ```rust
/// use property_sync::{ResourceData, ValueType};
///
/// let mut data = ResourceData::new("environment", ValueType::SingleSelect);
/// data.allowed_values = vec!["production".to_string(), "development".to_string()];
///
/// assert!(!data.is_tracked());
/// data.set_id("acme:environment");
/// assert_eq!(data.id(), "acme:environment");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,

    pub name: String,

    pub value_type: ValueType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Order is significant.
    #[serde(default)]
    pub allowed_values: Vec<String>,

    #[serde(default)]
    pub values_editable_by: ValuesEditableBy,
}

impl ResourceData {
    /// Creates an untracked record with every optional attribute at its default.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            value_type,
            required: false,
            default_value: None,
            description: None,
            allowed_values: Vec::new(),
            values_editable_by: ValuesEditableBy::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Forgets the remote object. Used when it no longer exists.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// Returns `true` when the record refers to a remote object.
    pub fn is_tracked(&self) -> bool {
        !self.id.is_empty()
    }

    /// The default value, unless it is unset or empty.
    pub fn default_value_ok(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|v| !v.is_empty())
    }

    /// The allowed values, unless there are none.
    pub fn allowed_values_ok(&self) -> Option<&[String]> {
        if self.allowed_values.is_empty() {
            None
        } else {
            Some(&self.allowed_values)
        }
    }

    /// Returns `true` if the declared attributes (everything but the identifier) match.
    pub fn same_attributes(&self, other: &ResourceData) -> bool {
        self.changed_attributes(other).is_empty()
    }

    /// Names of the attributes whose values differ from `other`.
    pub fn changed_attributes(&self, other: &ResourceData) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.name != other.name {
            changed.push("name");
        }
        if self.value_type != other.value_type {
            changed.push("value_type");
        }
        if self.required != other.required {
            changed.push("required");
        }
        if self.default_value_ok() != other.default_value_ok() {
            changed.push("default_value");
        }
        if self.description.as_deref().unwrap_or_default()
            != other.description.as_deref().unwrap_or_default()
        {
            changed.push("description");
        }
        if self.allowed_values != other.allowed_values {
            changed.push("allowed_values");
        }
        if self.values_editable_by != other.values_editable_by {
            changed.push("values_editable_by");
        }
        changed
    }
}
