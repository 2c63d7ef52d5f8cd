//! Deciding what an apply has to do for one property.

use std::fmt;

use crate::resource_data::ResourceData;

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;

/// The change needed to bring the tracked state in line with the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Declared but not tracked.
    Create,
    /// Mutable attributes differ.
    Update { changed: Vec<&'static str> },
    /// `name` or `value_type` differ; the property is deleted and created again.
    Replace { changed: Vec<&'static str> },
    /// Tracked but no longer declared.
    Delete,
    NoChange,
}

impl PlanAction {
    pub fn is_change(&self) -> bool {
        !matches!(self, PlanAction::NoChange)
    }
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanAction::Create => f.write_str("create"),
            PlanAction::Update { changed } => write!(f, "update ({})", changed.join(", ")),
            PlanAction::Replace { changed } => {
                write!(f, "replace ({} forces replacement)", changed.join(", "))
            }
            PlanAction::Delete => f.write_str("delete"),
            PlanAction::NoChange => f.write_str("no changes"),
        }
    }
}

const FORCE_NEW_ATTRIBUTES: [&str; 2] = ["name", "value_type"];

/// Compares the tracked record with the declared one.
///
/// An untracked prior record (empty identifier) counts as absent.
pub fn plan(prior: Option<&ResourceData>, desired: Option<&ResourceData>) -> PlanAction {
    let prior = prior.filter(|p| p.is_tracked());
    match (prior, desired) {
        (None, None) => PlanAction::NoChange,
        (None, Some(_)) => PlanAction::Create,
        (Some(_), None) => PlanAction::Delete,
        (Some(prior), Some(desired)) => {
            let changed = prior.changed_attributes(desired);
            if changed.is_empty() {
                PlanAction::NoChange
            } else if changed.iter().any(|a| FORCE_NEW_ATTRIBUTES.contains(a)) {
                PlanAction::Replace {
                    changed: changed
                        .into_iter()
                        .filter(|a| FORCE_NEW_ATTRIBUTES.contains(a))
                        .collect(),
                }
            } else {
                PlanAction::Update { changed }
            }
        }
    }
}
