//! Command modules for the org-props CLI.
//!
//! - `session`: Connecting to GitHub and resolving the owner
//! - `sync_cmd`: The plan, apply, refresh and destroy commands
//! - `import_cmd`: Adopting an existing property into the state file
//! - `schema_cmd`: Describing the attributes of a property declaration

pub mod import_cmd;
pub mod schema_cmd;
pub mod session;
pub mod sync_cmd;
