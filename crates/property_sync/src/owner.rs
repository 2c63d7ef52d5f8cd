//! The account context operations run in.
//!
//! Custom property definitions only exist on organizations, so every
//! synchronizer operation starts with [`check_organization`].

use github_client::{models::Account, AccountClient};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument, warn};

use crate::errors::{PropertyError, PropertyResult};

#[cfg(test)]
#[path = "owner_tests.rs"]
mod tests;

/// The kind of account an [`Owner`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Organization,
    User,
    /// No credentials were configured.
    Anonymous,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OwnerKind::Organization => "an organization",
            OwnerKind::User => "a user",
            OwnerKind::Anonymous => "an anonymous account",
        };
        f.write_str(text)
    }
}

/// The account that operations are performed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    name: String,
    kind: OwnerKind,
}

impl Owner {
    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OwnerKind::Organization,
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OwnerKind::User,
        }
    }

    pub fn anonymous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OwnerKind::Anonymous,
        }
    }

    /// Builds the owner from the account GitHub reports for its login.
    pub fn from_account(account: &Account) -> Self {
        if account.is_organization() {
            Self::organization(account.login.clone())
        } else {
            Self::user(account.login.clone())
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OwnerKind {
        self.kind
    }

    pub fn is_organization(&self) -> bool {
        self.kind == OwnerKind::Organization
    }
}

/// Fails unless the owner is an organization.
///
/// The returned error is meant to be passed to the caller unchanged.
pub fn check_organization(owner: &Owner) -> PropertyResult<()> {
    if owner.is_organization() {
        return Ok(());
    }

    Err(PropertyError::NotAnOrganization {
        name: owner.name.clone(),
        kind: owner.kind,
    })
}

/// Resolves the kind of account `login` refers to.
///
/// # Errors
///
/// Returns `PropertyError::OwnerLookup` if GitHub cannot be asked, for
/// example because the token is rejected or the account does not exist.
#[instrument(skip(client))]
pub async fn resolve_owner(client: &dyn AccountClient, login: &str) -> PropertyResult<Owner> {
    match client.get_account(login).await {
        Ok(account) => {
            let owner = Owner::from_account(&account);
            info!(login = login, kind = %owner.kind, "Resolved owner");
            Ok(owner)
        }
        Err(e) => {
            warn!(login = login, error = %e, "Failed to resolve owner");
            Err(PropertyError::OwnerLookup {
                login: login.to_string(),
                source: e,
            })
        }
    }
}
