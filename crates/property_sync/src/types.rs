//! Typed enumerations for custom property attributes.
//!
//! Both enums parse from and render to the exact strings used in
//! configuration files and by the GitHub API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::PropertyError;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

/// The type of value a custom property holds.
///
/// # Examples
///
/// ```rust
/// use property_sync::ValueType;
///
/// let value_type: ValueType = "single_select".parse().unwrap();
/// assert!(value_type.is_select());
/// assert_eq!(value_type.to_string(), "single_select");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// One value drawn from `allowed_values`.
    SingleSelect,
    /// Any subset of `allowed_values`.
    MultiSelect,
    /// Free-form text.
    String,
    /// A boolean.
    TrueFalse,
}

impl ValueType {
    /// Every value type, in the order used in messages.
    pub const ALL: [ValueType; 4] = [
        ValueType::SingleSelect,
        ValueType::MultiSelect,
        ValueType::String,
        ValueType::TrueFalse,
    ];

    /// Returns the wire name of the value type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::SingleSelect => "single_select",
            ValueType::MultiSelect => "multi_select",
            ValueType::String => "string",
            ValueType::TrueFalse => "true_false",
        }
    }

    /// Returns `true` for value types whose values come from `allowed_values`.
    pub fn is_select(&self) -> bool {
        matches!(self, ValueType::SingleSelect | ValueType::MultiSelect)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                PropertyError::invalid_choice(
                    "value_type",
                    &ValueType::ALL.map(|v| v.as_str()),
                    s,
                )
            })
    }
}

/// Who may edit the values of a custom property on repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuesEditableBy {
    /// Organization actors only.
    #[default]
    OrgActors,
    /// Organization actors and repository actors.
    OrgAndRepoActors,
}

impl ValuesEditableBy {
    pub const ALL: [ValuesEditableBy; 2] =
        [ValuesEditableBy::OrgActors, ValuesEditableBy::OrgAndRepoActors];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuesEditableBy::OrgActors => "org_actors",
            ValuesEditableBy::OrgAndRepoActors => "org_and_repo_actors",
        }
    }
}

impl fmt::Display for ValuesEditableBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValuesEditableBy {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValuesEditableBy::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                PropertyError::invalid_choice(
                    "values_editable_by",
                    &ValuesEditableBy::ALL.map(|v| v.as_str()),
                    s,
                )
            })
    }
}
