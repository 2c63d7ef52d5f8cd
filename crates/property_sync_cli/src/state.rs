//! The state file recording which properties org-props manages.
//!
//! Each tracked property is stored with its identifier and the attributes
//! last read from GitHub. The file is JSON and is rewritten after every
//! command that changes it.

use chrono::{DateTime, Utc};
use property_sync::ResourceData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::Error;

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

/// Default name of the state file.
pub const DEFAULT_STATE_FILE: &str = "org-props.state.json";

/// Format version written to new state files.
pub const STATE_VERSION: u32 = 1;

/// Tracked properties keyed by property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub resources: BTreeMap<String, ResourceData>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: None,
            resources: BTreeMap::new(),
        }
    }
}

impl StateFile {
    /// Loads the state file, or returns an empty state if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::State` if the file exists but cannot be read or parsed,
    /// or was written by a newer format version.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            debug!("No state file at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::State(format!(
                "Failed to read state file {}: {}",
                path.display(),
                e
            ))
        })?;

        let state: StateFile = serde_json::from_str(&content)
            .map_err(|e| Error::State(format!("Failed to parse state file: {}", e)))?;

        if state.version > STATE_VERSION {
            return Err(Error::State(format!(
                "State file version {} is newer than supported version {}",
                state.version, STATE_VERSION
            )));
        }

        debug!(
            resources = state.resources.len(),
            "State loaded from: {}",
            path.display()
        );
        Ok(state)
    }

    /// Writes the state to `path`, stamping it with the current time.
    pub fn save(&mut self, path: &Path) -> Result<(), Error> {
        self.updated_at = Some(Utc::now());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::State(format!(
                        "Failed to create state directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::State(format!("Failed to serialize state: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            Error::State(format!(
                "Failed to write state file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            resources = self.resources.len(),
            "State saved to: {}",
            path.display()
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ResourceData> {
        self.resources.get(name)
    }

    /// Records `data` under its name. Untracked records are removed instead.
    pub fn put(&mut self, data: ResourceData) {
        if data.is_tracked() {
            self.resources.insert(data.name.clone(), data);
        } else {
            self.resources.remove(&data.name);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ResourceData> {
        self.resources.remove(name)
    }
}
