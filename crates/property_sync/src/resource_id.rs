//! Composite identifiers for tracked properties.
//!
//! A property is addressed by its organization and its name, joined by
//! [`ID_SEPARATOR`]: `acme:environment`.

use crate::errors::{PropertyError, PropertyResult};

#[cfg(test)]
#[path = "resource_id_tests.rs"]
mod tests;

pub const ID_SEPARATOR: char = ':';

/// Joins two identifier parts.
pub fn build_two_part_id(left: &str, right: &str) -> String {
    format!("{}{}{}", left, ID_SEPARATOR, right)
}

/// Splits an identifier built by [`build_two_part_id`].
///
/// `left_name` and `right_name` only appear in the error message. The id is
/// split at the first separator; anything after it belongs to the right part.
pub fn parse_two_part_id(
    id: &str,
    left_name: &'static str,
    right_name: &'static str,
) -> PropertyResult<(String, String)> {
    match id.split_once(ID_SEPARATOR) {
        Some((left, right)) => Ok((left.to_string(), right.to_string())),
        None => Err(PropertyError::InvalidId {
            id: id.to_string(),
            left: left_name,
            right: right_name,
        }),
    }
}

/// Builds the identifier of a custom property.
pub fn build_property_id(org: &str, property_name: &str) -> String {
    build_two_part_id(org, property_name)
}

/// Splits a custom property identifier into `(organization, property_name)`.
pub fn parse_property_id(id: &str) -> PropertyResult<(String, String)> {
    parse_two_part_id(id, "organization", "property_name")
}
