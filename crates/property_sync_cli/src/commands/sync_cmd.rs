//! The plan, apply, refresh and destroy commands.
//!
//! Every command follows the same steps: load the declaration file and the
//! state file, connect, refresh each tracked property from GitHub, then act.
//! The state file is saved even when an operation fails part way, so that the
//! properties already changed stay tracked.
//!
//! # Examples
//!
//! ```bash
//! # Show what apply would change
//! org-props plan
//!
//! # Make GitHub match the declaration file
//! org-props --config acme.toml --state acme.state.json apply
//!
//! # Delete every tracked property
//! org-props destroy
//! ```

use colored::Colorize;
use property_sync::{plan, CustomPropertyResource, PlanAction, ResourceData, RESOURCE_TYPE};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::commands::session::{connect, Session};
use crate::config::AppConfig;
use crate::errors::Error;
use crate::state::StateFile;

#[cfg(test)]
#[path = "sync_cmd_tests.rs"]
mod tests;

/// The planned action for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    pub name: String,
    pub action: PlanAction,
}

/// Counts of what an apply or destroy did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub created: usize,
    pub updated: usize,
    pub replaced: usize,
    pub deleted: usize,
}

/// Refreshes every tracked property from GitHub.
///
/// Properties that no longer exist are dropped from the state.
#[instrument(skip(session, state))]
pub async fn refresh_state(session: &Session, state: &mut StateFile) -> Result<(), Error> {
    let names: Vec<String> = state.resources.keys().cloned().collect();

    for name in names {
        let Some(mut data) = state.get(&name).cloned() else {
            continue;
        };

        session.resource().read(session.owner(), &mut data).await?;
        if !data.is_tracked() {
            warn!(property_name = name, "Tracked property no longer exists");
        }

        // A property read under a different name is re-keyed.
        state.remove(&name);
        state.put(data);
    }

    debug!(resources = state.resources.len(), "State refreshed");
    Ok(())
}

/// Compares the declarations with the tracked state.
///
/// Declared properties come first in declaration order, followed by tracked
/// properties that are no longer declared.
pub fn plan_changes(desired: &[ResourceData], state: &StateFile) -> Vec<PlannedChange> {
    let mut changes: Vec<PlannedChange> = desired
        .iter()
        .map(|d| PlannedChange {
            name: d.name.clone(),
            action: plan(state.get(&d.name), Some(d)),
        })
        .collect();

    for (name, prior) in &state.resources {
        if desired.iter().any(|d| &d.name == name) {
            continue;
        }
        changes.push(PlannedChange {
            name: name.clone(),
            action: plan(Some(prior), None),
        });
    }

    changes
}

/// Checks every declaration a planned create, replace or update would send.
///
/// Nothing is sent to GitHub. A replacement deletes the existing property
/// first, so its new declaration must be known to be valid beforehand.
pub fn check_changes(desired: &[ResourceData], changes: &[PlannedChange]) -> Result<(), Error> {
    for change in changes {
        let Some(declared) = desired.iter().find(|d| d.name == change.name) else {
            continue;
        };

        let result = match change.action {
            PlanAction::Create | PlanAction::Replace { .. } => {
                CustomPropertyResource::check_declaration(declared)
            }
            PlanAction::Update { .. } => CustomPropertyResource::check_update(declared),
            PlanAction::Delete | PlanAction::NoChange => Ok(()),
        };
        result.map_err(|e| Error::Config(format!("custom property {:?}: {}", change.name, e)))?;
    }
    Ok(())
}

/// Carries out the planned changes in order and records the results in `state`.
///
/// Every declaration is checked with [`check_changes`] before the first
/// remote call. A replacement deletes the property before creating it again.
/// The first failure stops the apply; changes made before it remain in `state`.
#[instrument(skip_all, fields(changes = changes.len()))]
pub async fn apply_changes(
    session: &Session,
    desired: &[ResourceData],
    changes: &[PlannedChange],
    state: &mut StateFile,
) -> Result<ApplySummary, Error> {
    check_changes(desired, changes)?;

    let mut summary = ApplySummary::default();
    let resource = session.resource();
    let owner = session.owner();

    for change in changes {
        let declared = desired.iter().find(|d| d.name == change.name);

        match (&change.action, declared) {
            (PlanAction::NoChange, _) => continue,
            (PlanAction::Create, Some(declared)) => {
                let mut data = declared.clone();
                resource.create(owner, &mut data).await?;
                state.put(data);
                summary.created += 1;
            }
            (PlanAction::Update { .. }, Some(declared)) => {
                let Some(prior) = state.get(&change.name) else {
                    continue;
                };
                let mut data = declared.clone();
                data.set_id(prior.id());
                resource.update(owner, &mut data).await?;
                state.put(data);
                summary.updated += 1;
            }
            (PlanAction::Replace { .. }, Some(declared)) => {
                if let Some(prior) = state.get(&change.name).cloned() {
                    resource.delete(owner, &prior).await?;
                    state.remove(&change.name);
                }
                let mut data = declared.clone();
                resource.create(owner, &mut data).await?;
                state.put(data);
                summary.replaced += 1;
            }
            (PlanAction::Delete, _) => {
                if let Some(prior) = state.get(&change.name).cloned() {
                    resource.delete(owner, &prior).await?;
                    state.remove(&change.name);
                    summary.deleted += 1;
                }
            }
            (_, None) => {
                warn!(
                    property_name = change.name,
                    action = %change.action,
                    "Skipping change for a property that is not declared"
                );
            }
        }
    }

    info!(
        created = summary.created,
        updated = summary.updated,
        replaced = summary.replaced,
        deleted = summary.deleted,
        "Apply finished"
    );
    Ok(summary)
}

/// Deletes every tracked property.
#[instrument(skip_all)]
pub async fn destroy_all(session: &Session, state: &mut StateFile) -> Result<ApplySummary, Error> {
    let changes: Vec<PlannedChange> = state
        .resources
        .keys()
        .map(|name| PlannedChange {
            name: name.clone(),
            action: PlanAction::Delete,
        })
        .collect();

    apply_changes(session, &[], &changes, state).await
}

/// Renders a plan for the terminal.
pub fn format_plan(changes: &[PlannedChange]) -> String {
    let pending: Vec<&PlannedChange> = changes.iter().filter(|c| c.action.is_change()).collect();
    if pending.is_empty() {
        return format!(
            "{}\n",
            "No changes. GitHub matches the configuration.".green()
        );
    }

    let mut output = String::new();
    for change in &pending {
        let symbol = match change.action {
            PlanAction::Create => "+".green(),
            PlanAction::Update { .. } => "~".yellow(),
            PlanAction::Replace { .. } => "-/+".red(),
            PlanAction::Delete => "-".red(),
            PlanAction::NoChange => " ".normal(),
        };
        output.push_str(&format!(
            "  {} {}.{}: {}\n",
            symbol,
            RESOURCE_TYPE,
            change.name.bold(),
            change.action
        ));
    }

    let mut totals = ApplySummary::default();
    for change in &pending {
        match change.action {
            PlanAction::Create => totals.created += 1,
            PlanAction::Update { .. } => totals.updated += 1,
            PlanAction::Replace { .. } => totals.replaced += 1,
            PlanAction::Delete => totals.deleted += 1,
            PlanAction::NoChange => {}
        }
    }
    output.push_str(&format!(
        "\nPlan: {} to create, {} to update, {} to replace, {} to delete.\n",
        totals.created, totals.updated, totals.replaced, totals.deleted
    ));
    output
}

/// Renders the result of an apply or destroy.
pub fn format_summary(summary: &ApplySummary) -> String {
    format!(
        "{} {} created, {} updated, {} replaced, {} deleted.\n",
        "Apply complete!".green().bold(),
        summary.created,
        summary.updated,
        summary.replaced,
        summary.deleted
    )
}

/// Loads the declarations, connects and refreshes the state.
async fn prepare(
    config_path: &Path,
    state_path: &Path,
) -> Result<(Vec<ResourceData>, Session, StateFile), Error> {
    let config = AppConfig::load(config_path)?;
    let desired = config.desired_properties()?;
    let session = connect(&config.provider).await?;
    let mut state = StateFile::load(state_path)?;

    refresh_state(&session, &mut state).await?;
    Ok((desired, session, state))
}

/// Prints the changes an apply would make. Nothing is written.
#[instrument]
pub async fn execute_plan(config_path: &Path, state_path: &Path) -> Result<(), Error> {
    let (desired, _, state) = prepare(config_path, state_path).await?;
    let changes = plan_changes(&desired, &state);
    print!("{}", format_plan(&changes));
    check_changes(&desired, &changes)
}

/// Makes GitHub match the declaration file.
#[instrument]
pub async fn execute_apply(config_path: &Path, state_path: &Path) -> Result<(), Error> {
    let (desired, session, mut state) = prepare(config_path, state_path).await?;
    let changes = plan_changes(&desired, &state);
    print!("{}", format_plan(&changes));

    let result = apply_changes(&session, &desired, &changes, &mut state).await;
    state.save(state_path)?;

    let summary = result?;
    print!("{}", format_summary(&summary));
    Ok(())
}

/// Refreshes the state file from GitHub without changing any property.
#[instrument]
pub async fn execute_refresh(config_path: &Path, state_path: &Path) -> Result<(), Error> {
    let (_, _, mut state) = prepare(config_path, state_path).await?;
    state.save(state_path)?;
    println!("Refreshed {} tracked properties.", state.resources.len());
    Ok(())
}

/// Deletes every tracked property from GitHub.
#[instrument]
pub async fn execute_destroy(config_path: &Path, state_path: &Path) -> Result<(), Error> {
    let (_, session, mut state) = prepare(config_path, state_path).await?;

    let result = destroy_all(&session, &mut state).await;
    state.save(state_path)?;

    let summary = result?;
    print!("{}", format_summary(&summary));
    Ok(())
}
