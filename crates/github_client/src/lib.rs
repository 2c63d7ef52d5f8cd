//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for managing organization custom property
//! definitions and for resolving account logins, authenticated with a
//! personal access token (or unauthenticated, for read-only lookups).

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod custom_property;
pub use custom_property::OrganizationCustomProperty;

pub mod models;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait for organization custom property operations.
///
/// These three calls are the full surface the property synchronizer needs
/// from GitHub. Implementations must not retry; errors are reported to the
/// caller as-is.
#[async_trait]
pub trait CustomPropertyClient: Send + Sync {
    /// Creates a custom property definition or replaces the existing one with
    /// the same name.
    ///
    /// # Arguments
    ///
    /// * `org` - The organization that owns the property.
    /// * `property_name` - The name of the property, used as the path key.
    /// * `property` - The complete definition to submit.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the organization does not exist, or another
    /// `Error` variant if GitHub rejects the request.
    async fn create_or_update_org_custom_property(
        &self,
        org: &str,
        property_name: &str,
        property: &OrganizationCustomProperty,
    ) -> Result<OrganizationCustomProperty, Error>;

    /// Lists every custom property definition of an organization.
    async fn list_org_custom_properties(
        &self,
        org: &str,
    ) -> Result<Vec<OrganizationCustomProperty>, Error>;

    /// Removes a custom property definition from an organization.
    async fn remove_org_custom_property(&self, org: &str, property_name: &str)
        -> Result<(), Error>;
}

/// Trait for resolving account details.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Gets the account (user or organization) with the given login.
    async fn get_account(&self, login: &str) -> Result<models::Account, Error>;
}

/// A client for interacting with the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab` instance.
    ///
    /// Use [`create_token_client`] or [`create_anonymous_client`] to build the
    /// `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CustomPropertyClient for GitHubClient {
    /// Creates or updates a property using `PUT /orgs/{org}/properties/schema/{name}`.
    #[instrument(skip(self, property), fields(org = %org, property_name = %property_name))]
    async fn create_or_update_org_custom_property(
        &self,
        org: &str,
        property_name: &str,
        property: &OrganizationCustomProperty,
    ) -> Result<OrganizationCustomProperty, Error> {
        let path = schema_path(org, Some(property_name))?;

        debug!(value_type = property.value_type, "Making API call to: {}", path);
        let response: OctocrabResult<OrganizationCustomProperty> =
            self.client.put(path, Some(property)).await;
        match response {
            Ok(p) => {
                info!(
                    org = org,
                    property_name = property_name,
                    "Custom property created or updated"
                );
                Ok(p)
            }
            Err(e) => Err(map_octocrab_error(
                "Failed to create or update organization custom property",
                e,
            )),
        }
    }

    /// Lists properties using `GET /orgs/{org}/properties/schema`.
    #[instrument(skip(self), fields(org = %org))]
    async fn list_org_custom_properties(
        &self,
        org: &str,
    ) -> Result<Vec<OrganizationCustomProperty>, Error> {
        let path = schema_path(org, None)?;

        debug!("Making API call to: {}", path);
        let response: OctocrabResult<Vec<OrganizationCustomProperty>> =
            self.client.get(path, None::<&()>).await;
        match response {
            Ok(properties) => {
                debug!(
                    org = org,
                    count = properties.len(),
                    "Retrieved organization custom properties"
                );
                Ok(properties)
            }
            Err(e) => Err(map_octocrab_error(
                "Failed to list organization custom properties",
                e,
            )),
        }
    }

    /// Removes a property using `DELETE /orgs/{org}/properties/schema/{name}`.
    ///
    /// GitHub answers with `204 No Content`, so the raw response is checked for
    /// an error status instead of being deserialized.
    #[instrument(skip(self), fields(org = %org, property_name = %property_name))]
    async fn remove_org_custom_property(
        &self,
        org: &str,
        property_name: &str,
    ) -> Result<(), Error> {
        let path = schema_path(org, Some(property_name))?;
        let uri = Uri::builder()
            .path_and_query(path.as_str())
            .build()
            .map_err(|e| {
                error!(path = path, error = %e, "Failed to build request URI");
                Error::ApiError(format!("invalid request path {}: {}", path, e))
            })?;

        debug!("Making API call to: {}", path);
        let response = match self.client._delete(uri, None::<&()>).await {
            Ok(r) => r,
            Err(e) => {
                return Err(map_octocrab_error(
                    "Failed to remove organization custom property",
                    e,
                ))
            }
        };

        match octocrab::map_github_error(response).await {
            Ok(_) => {
                info!(
                    org = org,
                    property_name = property_name,
                    "Custom property removed"
                );
                Ok(())
            }
            Err(e) => Err(map_octocrab_error(
                "Failed to remove organization custom property",
                e,
            )),
        }
    }
}

#[async_trait]
impl AccountClient for GitHubClient {
    /// Resolves an account using `GET /users/{login}`.
    #[instrument(skip(self), fields(login = %login))]
    async fn get_account(&self, login: &str) -> Result<models::Account, Error> {
        let path = format!("/users/{}", login);

        debug!("Making API call to: {}", path);
        let response: OctocrabResult<models::Account> = self.client.get(path, None::<&()>).await;
        match response {
            Ok(account) => {
                info!(
                    login = login,
                    account_type = account.account_type,
                    "Resolved account"
                );
                Ok(account)
            }
            Err(e) => Err(map_octocrab_error("Failed to get account", e)),
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The personal access token (classic or fine-grained).
/// * `base_uri` - Optional API root, e.g. for GitHub Enterprise Server. Defaults
///   to `https://api.github.com`.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient};
///
/// let octocrab = create_token_client("ghp_example", None).unwrap();
/// let client = GitHubClient::new(octocrab);
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid base URI {}: {}", uri, e))
        })?;
    }

    builder
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with personal token");
            Error::AuthError("Failed to build a client for the personal token.".to_string())
        })
}

/// Creates an unauthenticated `Octocrab` client.
///
/// Anonymous clients can resolve public account information but cannot manage
/// organization custom properties.
#[instrument]
pub fn create_anonymous_client(base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid base URI {}: {}", uri, e))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build anonymous Octocrab client");
        Error::AuthError("Failed to build an anonymous client.".to_string())
    })
}

/// Builds `/orgs/{org}/properties/schema[/{name}]` with every segment
/// percent-encoded, so a `#` or `?` in a property name stays part of the path.
fn schema_path(org: &str, property_name: Option<&str>) -> Result<String, Error> {
    let invalid = |detail: String| {
        error!(org = org, property_name = ?property_name, "Failed to build request path");
        Error::ApiError(format!("invalid request path for {}: {}", org, detail))
    };

    let mut url = Url::parse("https://api.github.com/").map_err(|e| invalid(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid("base cannot hold a path".to_string()))?;
        segments.clear().extend(["orgs", org, "properties", "schema"]);
        if let Some(name) = property_name {
            segments.push(name);
        }
    }

    Ok(url.path().to_string())
}

/// Logs an octocrab error and converts it into a client [`Error`].
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            error!(
                status = source.status_code.as_u16(),
                error_message = source.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );

            match source.status_code {
                StatusCode::NOT_FOUND => Error::NotFound,
                StatusCode::UNAUTHORIZED => Error::AuthError(source.message.clone()),
                StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                    if source.message.to_lowercase().contains("rate limit") =>
                {
                    Error::RateLimitExceeded
                }
                _ => Error::ApiError(source.message.clone()),
            }
        }
        octocrab::Error::Serde { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response could not be deserialized.",
                message
            );
            Error::Deserialization(source)
        }
        octocrab::Error::Json { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response could not be deserialized.",
                message
            );
            Error::InvalidResponse
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::ApiError(source.to_string())
        }
        _ => {
            error!(error_message = e.to_string(), message);
            Error::ApiError(e.to_string())
        }
    }
}
