//! The organization custom property synchronizer.
//!
//! This module provides [`CustomPropertyResource`], which creates, reads,
//! updates and deletes one organization custom property so that GitHub
//! matches a [`ResourceData`] record.

use github_client::{CustomPropertyClient, OrganizationCustomProperty};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::{PropertyError, PropertyResult, RemoteAction};
use crate::owner::{check_organization, Owner};
use crate::resource_data::ResourceData;
use crate::resource_id::{build_property_id, parse_property_id};
use crate::types::{ValueType, ValuesEditableBy};

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;

/// Synchronizes a single organization custom property with GitHub.
///
/// Every operation first checks that the owner is an organization; that
/// error is returned unchanged and no request is sent. Remote failures are
/// wrapped with the action and property name. Nothing is retried.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient};
/// use property_sync::{CustomPropertyResource, Owner, ResourceData, ValueType};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitHubClient::new(create_token_client("ghp_example", None)?);
/// let resource = CustomPropertyResource::new(Arc::new(client));
/// let owner = Owner::organization("acme");
///
/// let mut data = ResourceData::new("environment", ValueType::SingleSelect);
/// data.allowed_values = vec!["production".to_string(), "development".to_string()];
///
/// resource.create(&owner, &mut data).await?;
/// assert_eq!(data.id(), "acme:environment");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CustomPropertyResource {
    client: Arc<dyn CustomPropertyClient>,
}

impl CustomPropertyResource {
    pub fn new(client: Arc<dyn CustomPropertyClient>) -> Self {
        Self { client }
    }

    /// Creates the property declared in `data` in the owner's organization.
    ///
    /// On success the identifier is set to `<org>:<name>` and `data` is
    /// refreshed from GitHub.
    ///
    /// # Errors
    ///
    /// - `PropertyError::NotAnOrganization` if the owner is not an organization.
    /// - `PropertyError::Validation` if a select type has no allowed values, or
    ///   a non-select type has some.
    /// - `PropertyError::Remote` if GitHub rejects the request.
    #[instrument(skip(self, owner, data), fields(org = %owner.name(), property_name = %data.name))]
    pub async fn create(&self, owner: &Owner, data: &mut ResourceData) -> PropertyResult<()> {
        check_organization(owner)?;

        let property = expand_property(data, AllowedValuesMode::Reject)?;
        let org = owner.name();

        self.client
            .create_or_update_org_custom_property(org, &data.name, &property)
            .await
            .map_err(|e| PropertyError::remote(RemoteAction::Creating, &data.name, e))?;

        info!(
            org = org,
            property_name = data.name,
            "Created organization custom property"
        );

        data.set_id(build_property_id(org, &data.name));
        self.read(owner, data).await
    }

    /// Refreshes `data` from GitHub.
    ///
    /// The organization's full list of properties is fetched and searched by
    /// name. If the property is gone the identifier is cleared and `Ok` is
    /// returned. `default_value` and `allowed_values` are only overwritten when
    /// GitHub reports a value for them.
    ///
    /// # Errors
    ///
    /// - `PropertyError::InvalidId` if the identifier is malformed.
    /// - `PropertyError::NotAnOrganization` if the owner is not an organization.
    /// - `PropertyError::Remote` if the list cannot be fetched.
    /// - `PropertyError::UnsupportedRemoteValue` if GitHub reports an unknown
    ///   value type or editor setting.
    #[instrument(skip(self, owner, data), fields(id = %data.id()))]
    pub async fn read(&self, owner: &Owner, data: &mut ResourceData) -> PropertyResult<()> {
        let (org, property_name) = parse_property_id(data.id())?;
        check_organization(owner)?;

        let properties = self
            .client
            .list_org_custom_properties(&org)
            .await
            .map_err(|e| PropertyError::remote(RemoteAction::Reading, &property_name, e))?;

        let property = match find_property(properties, &property_name) {
            Some(p) => p,
            None => {
                warn!(
                    org = org,
                    property_name = property_name,
                    "Removing organization custom property from state because it no longer exists in GitHub"
                );
                data.clear_id();
                return Ok(());
            }
        };

        data.set_id(build_property_id(&org, &property_name));
        flatten_property(&property_name, property, data)?;

        debug!(
            org = org,
            property_name = property_name,
            "Refreshed organization custom property"
        );
        Ok(())
    }

    /// Pushes the full declaration in `data` to GitHub and refreshes it.
    ///
    /// Unlike [`create`](Self::create), allowed values declared for a
    /// non-select type are dropped from the request instead of rejected.
    #[instrument(skip(self, owner, data), fields(org = %owner.name(), property_name = %data.name))]
    pub async fn update(&self, owner: &Owner, data: &mut ResourceData) -> PropertyResult<()> {
        check_organization(owner)?;

        let property = expand_property(data, AllowedValuesMode::Omit)?;
        let org = owner.name();

        self.client
            .create_or_update_org_custom_property(org, &data.name, &property)
            .await
            .map_err(|e| PropertyError::remote(RemoteAction::Updating, &data.name, e))?;

        info!(
            org = org,
            property_name = data.name,
            "Updated organization custom property"
        );

        self.read(owner, data).await
    }

    /// Removes the property identified by `data` from GitHub.
    #[instrument(skip(self, owner, data), fields(id = %data.id()))]
    pub async fn delete(&self, owner: &Owner, data: &ResourceData) -> PropertyResult<()> {
        let (org, property_name) = parse_property_id(data.id())?;
        check_organization(owner)?;

        self.client
            .remove_org_custom_property(&org, &property_name)
            .await
            .map_err(|e| PropertyError::remote(RemoteAction::Deleting, &property_name, e))?;

        info!(
            org = org,
            property_name = property_name,
            "Deleted organization custom property"
        );
        Ok(())
    }

    /// Checks that [`create`](Self::create) would accept `data`, without
    /// contacting GitHub.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::Validation` for the same declarations `create`
    /// rejects before sending a request.
    pub fn check_declaration(data: &ResourceData) -> PropertyResult<()> {
        expand_property(data, AllowedValuesMode::Reject).map(|_| ())
    }

    /// Checks that [`update`](Self::update) would accept `data`, without
    /// contacting GitHub.
    pub fn check_update(data: &ResourceData) -> PropertyResult<()> {
        expand_property(data, AllowedValuesMode::Omit).map(|_| ())
    }

    /// Starts tracking an existing property given its identifier.
    ///
    /// # Errors
    ///
    /// Returns `PropertyError::ImportNotFound` if the property does not exist,
    /// or any error [`read`](Self::read) returns.
    #[instrument(skip(self, owner))]
    pub async fn import(&self, owner: &Owner, id: &str) -> PropertyResult<ResourceData> {
        let (_, property_name) = parse_property_id(id)?;

        // value_type is overwritten by the read below.
        let mut data = ResourceData::new(property_name, ValueType::String);
        data.set_id(id);
        self.read(owner, &mut data).await?;

        if !data.is_tracked() {
            return Err(PropertyError::ImportNotFound(id.to_string()));
        }

        info!(id = id, "Imported organization custom property");
        Ok(data)
    }
}

/// How allowed values on a non-select type are handled when building a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AllowedValuesMode {
    Reject,
    Omit,
}

/// Builds the request body for the create-or-update call.
fn expand_property(
    data: &ResourceData,
    mode: AllowedValuesMode,
) -> PropertyResult<OrganizationCustomProperty> {
    let value_type = data.value_type;

    let allowed_values = match data.allowed_values_ok() {
        Some(values) if value_type.is_select() => Some(values.to_vec()),
        Some(_) if mode == AllowedValuesMode::Reject => {
            return Err(PropertyError::Validation(
                "allowed_values can only be set for single_select or multi_select value types"
                    .to_string(),
            ));
        }
        _ => None,
    };

    if value_type.is_select() && allowed_values.is_none() {
        return Err(PropertyError::Validation(format!(
            "allowed_values is required for {} value type",
            value_type
        )));
    }

    Ok(OrganizationCustomProperty {
        property_name: Some(data.name.clone()),
        value_type: value_type.to_string(),
        required: Some(data.required),
        default_value: data.default_value_ok().map(str::to_string),
        description: Some(data.description.clone().unwrap_or_default()),
        allowed_values,
        values_editable_by: Some(data.values_editable_by.to_string()),
        ..Default::default()
    })
}

/// Returns the first property with the given name.
fn find_property(
    properties: Vec<OrganizationCustomProperty>,
    property_name: &str,
) -> Option<OrganizationCustomProperty> {
    properties.into_iter().find(|p| p.has_name(property_name))
}

/// Copies the attributes GitHub reports into `data`.
fn flatten_property(
    property_name: &str,
    property: OrganizationCustomProperty,
    data: &mut ResourceData,
) -> PropertyResult<()> {
    let value_type: ValueType =
        property
            .value_type
            .parse()
            .map_err(|_| PropertyError::UnsupportedRemoteValue {
                name: property_name.to_string(),
                field: "value_type",
                value: property.value_type.clone(),
            })?;

    let values_editable_by = match property.values_editable_by.as_deref() {
        Some(value) => value
            .parse()
            .map_err(|_| PropertyError::UnsupportedRemoteValue {
                name: property_name.to_string(),
                field: "values_editable_by",
                value: value.to_string(),
            })?,
        None => ValuesEditableBy::default(),
    };

    data.name = property
        .property_name
        .unwrap_or_else(|| property_name.to_string());
    data.value_type = value_type;
    data.required = property.required.unwrap_or(false);
    data.description = property.description;
    data.values_editable_by = values_editable_by;

    if let Some(default_value) = property.default_value {
        data.default_value = Some(default_value);
    }

    if let Some(allowed_values) = property.allowed_values.filter(|v| !v.is_empty()) {
        data.allowed_values = allowed_values;
    }

    Ok(())
}
