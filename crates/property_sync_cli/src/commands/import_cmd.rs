//! Adopting an existing custom property into the state file.
//!
//! ```bash
//! org-props import acme:environment
//! ```

use colored::Colorize;
use property_sync::{parse_property_id, CustomPropertyConfig, ResourceData};
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::commands::session::{connect, Session};
use crate::config::AppConfig;
use crate::errors::Error;
use crate::state::StateFile;

#[cfg(test)]
#[path = "import_cmd_tests.rs"]
mod tests;

/// Reads the property identified by `id` and starts tracking it.
///
/// # Errors
///
/// - `Error::InvalidArguments` if a property with the same name is already tracked.
/// - `Error::Property` if the identifier is malformed, the owner is not an
///   organization, or the property does not exist.
#[instrument(skip(session, state))]
pub async fn import_property(
    session: &Session,
    state: &mut StateFile,
    id: &str,
) -> Result<ResourceData, Error> {
    let (_, property_name) = parse_property_id(id)?;

    if let Some(existing) = state.get(&property_name) {
        return Err(Error::InvalidArguments(format!(
            "custom property {:?} is already tracked as {}",
            property_name,
            existing.id()
        )));
    }

    let data = session.resource().import(session.owner(), id).await?;
    state.put(data.clone());

    info!(id = id, "Property added to state");
    Ok(data)
}

/// Renders the declaration matching an imported property.
pub fn format_declaration(data: &ResourceData) -> Result<String, Error> {
    #[derive(serde::Serialize)]
    struct Declaration {
        custom_properties: Vec<CustomPropertyConfig>,
    }

    let declaration = Declaration {
        custom_properties: vec![CustomPropertyConfig::from(data)],
    };
    toml::to_string(&declaration)
        .map_err(|e| Error::Config(format!("Failed to render declaration: {}", e)))
}

/// Imports `id` into the state file and prints the matching declaration.
#[instrument]
pub async fn execute_import(config_path: &Path, state_path: &Path, id: &str) -> Result<(), Error> {
    let config = AppConfig::load(config_path)?;
    let session = connect(&config.provider).await?;
    let mut state = StateFile::load(state_path)?;

    let data = import_property(&session, &mut state, id).await?;
    state.save(state_path)?;

    println!("{} {}", "Imported".green().bold(), id);
    if !config.custom_properties.iter().any(|p| p.name == data.name) {
        warn!(
            property_name = data.name,
            "Imported property is not declared and will be deleted by the next apply"
        );
        println!(
            "\nAdd this declaration to {} to keep it:\n\n{}",
            config_path.display(),
            format_declaration(&data)?
        );
    }
    Ok(())
}
