//! Loading and validating the org-props declaration file.
//!
//! The declaration file is TOML. It names the owner whose properties are
//! managed and declares each property the owner should have:
//!
//! ```toml
//! [provider]
//! owner = "acme"
//! token_env = "GITHUB_TOKEN"
//!
//! [[custom_properties]]
//! name = "environment"
//! value_type = "single_select"
//! allowed_values = ["production", "development"]
//! ```

use property_sync::{CustomPropertyConfig, ResourceData};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default name of the declaration file.
pub const DEFAULT_CONFIG_FILE: &str = "org-props.toml";

/// Environment variable read for the GitHub token when none is configured.
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Connection settings for GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Login of the account that owns the properties.
    pub owner: String,

    /// Name of the environment variable holding the token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Alternative API endpoint, e.g. for GitHub Enterprise Server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

/// The contents of the declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub provider: ProviderConfig,

    #[serde(default)]
    pub custom_properties: Vec<CustomPropertyConfig>,
}

impl AppConfig {
    /// Loads and validates the declaration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be parsed,
    /// or fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        config.validate()?;

        info!(
            owner = config.provider.owner,
            properties = config.custom_properties.len(),
            "Configuration loaded from: {}",
            path.display()
        );
        Ok(config)
    }

    /// Checks the provider settings and every declared property.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the owner is empty, the base URI is not a
    /// valid URL, a property name is declared twice, or a property declaration
    /// is invalid.
    pub fn validate(&self) -> Result<(), Error> {
        if self.provider.owner.trim().is_empty() {
            return Err(Error::Config("provider.owner must not be empty".to_string()));
        }

        if let Some(base_uri) = &self.provider.base_uri {
            Url::parse(base_uri).map_err(|e| {
                Error::Config(format!("provider.base_uri {:?} is invalid: {}", base_uri, e))
            })?;
        }

        let mut seen = HashSet::new();
        for property in &self.custom_properties {
            if !seen.insert(property.name.as_str()) {
                return Err(Error::Config(format!(
                    "custom property {:?} is declared more than once",
                    property.name
                )));
            }

            property.validate().map_err(|e| {
                Error::Config(format!("custom property {:?}: {}", property.name, e))
            })?;
        }

        Ok(())
    }

    /// Returns the validated declarations in file order.
    pub fn desired_properties(&self) -> Result<Vec<ResourceData>, Error> {
        self.custom_properties
            .iter()
            .map(|p| {
                p.validate()
                    .map_err(|e| Error::Config(format!("custom property {:?}: {}", p.name, e)))
            })
            .collect()
    }
}
