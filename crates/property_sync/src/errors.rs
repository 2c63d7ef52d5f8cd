//! Error types for custom property synchronization.
//!
//! Every failure of the synchronizer is surfaced to the caller; nothing is
//! retried. A property that disappeared remotely is not an error, see
//! [`crate::CustomPropertyResource::read`].

use std::fmt;

use crate::owner::OwnerKind;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type for synchronizer operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// The remote call a [`PropertyError::Remote`] failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    Creating,
    Reading,
    Updating,
    Deleting,
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            RemoteAction::Creating => "creating",
            RemoteAction::Reading => "reading",
            RemoteAction::Updating => "updating",
            RemoteAction::Deleting => "deleting",
        };
        f.write_str(verb)
    }
}

/// Errors that can occur while synchronizing a custom property.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// The operation was attempted for an owner that is not an organization.
    ///
    /// Raised before any network call is made.
    #[error("this resource can only be used in the context of an organization, {name:?} is {kind}")]
    NotAnOrganization { name: String, kind: OwnerKind },

    /// The declaration is invalid.
    #[error("{0}")]
    Validation(String),

    /// A persisted identifier could not be split into its two parts.
    #[error("unexpected ID format ({id:?}); expected {left}:{right}")]
    InvalidId {
        id: String,
        left: &'static str,
        right: &'static str,
    },

    /// A call to GitHub failed.
    #[error("error {action} organization custom property {name}: {source}")]
    Remote {
        action: RemoteAction,
        name: String,
        source: github_client::Error,
    },

    /// GitHub returned a property whose attributes this crate does not understand.
    #[error("organization custom property {name} has unsupported {field} {value:?}")]
    UnsupportedRemoteValue {
        name: String,
        field: &'static str,
        value: String,
    },

    /// The account type of the owner could not be looked up.
    #[error("failed to resolve owner {login:?}: {source}")]
    OwnerLookup {
        login: String,
        source: github_client::Error,
    },

    /// An import was requested for a property that does not exist.
    #[error("cannot import non-existent organization custom property {0}")]
    ImportNotFound(String),
}

impl PropertyError {
    /// Builds the validation error for a value outside a fixed set of choices.
    pub fn invalid_choice(field: &str, choices: &[&str], got: &str) -> Self {
        PropertyError::Validation(format!(
            "expected {} to be one of {:?}, got {}",
            field, choices, got
        ))
    }

    pub(crate) fn remote(action: RemoteAction, name: &str, source: github_client::Error) -> Self {
        PropertyError::Remote {
            action,
            name: name.to_string(),
            source,
        }
    }
}
