//! Connecting to GitHub.
//!
//! A [`Session`] pairs the resolved owner with the synchronizer every command
//! runs through.

use github_client::{
    create_anonymous_client, create_token_client, CustomPropertyClient, GitHubClient,
};
use property_sync::{resolve_owner, CustomPropertyResource, Owner};
use std::env;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::ProviderConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// The owner and synchronizer a command works with.
#[derive(Clone)]
pub struct Session {
    owner: Owner,
    resource: CustomPropertyResource,
}

impl Session {
    pub fn new(owner: Owner, client: Arc<dyn CustomPropertyClient>) -> Self {
        Self {
            owner,
            resource: CustomPropertyResource::new(client),
        }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn resource(&self) -> &CustomPropertyResource {
        &self.resource
    }
}

/// Builds a session from the provider settings.
///
/// The token is read from the environment variable named by
/// `provider.token_env`. With a token the owner's account type is looked up on
/// GitHub. Without one an anonymous client is used and the owner is treated
/// as an anonymous account, which every property operation rejects.
///
/// # Errors
///
/// - `Error::GitHub` if the client cannot be built.
/// - `Error::Property` if a token is set but the owner cannot be looked up,
///   for example because GitHub rejects the token.
#[instrument(skip(provider), fields(owner = %provider.owner))]
pub async fn connect(provider: &ProviderConfig) -> Result<Session, Error> {
    let base_uri = provider.base_uri.as_deref();
    let token = env::var(&provider.token_env)
        .ok()
        .filter(|t| !t.trim().is_empty());

    match token {
        Some(token) => {
            let client = Arc::new(GitHubClient::new(create_token_client(&token, base_uri)?));
            let owner = resolve_owner(&*client, &provider.owner).await?;
            info!(owner = owner.name(), kind = %owner.kind(), "Connected to GitHub");
            Ok(Session::new(owner, client))
        }
        None => {
            warn!(
                token_env = provider.token_env,
                "No GitHub token found, continuing without credentials"
            );
            let client = Arc::new(GitHubClient::new(create_anonymous_client(base_uri)?));
            Ok(Session::new(Owner::anonymous(provider.owner.clone()), client))
        }
    }
}
