//! # Models
//!
//! Account models used to decide whether an owner is an organization.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Account type GitHub reports for organizations.
pub const ORGANIZATION_ACCOUNT_TYPE: &str = "Organization";

/// Represents a GitHub account (user or organization).
///
/// Returned by `GET /users/{login}`, which resolves both user and
/// organization logins.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Account;
///
/// let account = Account {
///     id: 9919,
///     login: "github".to_string(),
///     account_type: "Organization".to_string(),
///     node_id: "MDEyOk9yZ2FuaXphdGlvbjk5MTk=".to_string(),
/// };
///
/// assert!(account.is_organization());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    /// The unique ID of the account
    pub id: u64,
    /// The login name of the account
    pub login: String,
    /// The type of account (User or Organization)
    #[serde(rename = "type")]
    pub account_type: String,
    /// The node ID for GraphQL operations
    #[serde(default)]
    pub node_id: String,
}

impl Account {
    /// Returns `true` if the account is an organization.
    pub fn is_organization(&self) -> bool {
        self.account_type == ORGANIZATION_ACCOUNT_TYPE
    }
}
