//! Keeps GitHub organization custom properties in line with their declarations.
//!
//! The crate is organized around a single resource:
//!
//! - [`CustomPropertyConfig`] is a declaration as written by a user; validating
//!   it produces a [`ResourceData`] record.
//! - [`CustomPropertyResource`] creates, reads, updates, deletes and imports
//!   the matching property through a [`github_client::CustomPropertyClient`].
//! - [`plan`] decides which of those operations an apply needs.
//!
//! Operations only run for organization owners, see [`check_organization`].

pub mod errors;
pub use errors::{PropertyError, PropertyResult, RemoteAction};

pub mod owner;
pub use owner::{check_organization, resolve_owner, Owner, OwnerKind};

pub mod plan;
pub use plan::{plan, PlanAction};

pub mod resource;
pub use resource::CustomPropertyResource;

pub mod resource_data;
pub use resource_data::ResourceData;

pub mod resource_id;
pub use resource_id::{build_property_id, parse_property_id, ID_SEPARATOR};

pub mod schema;
pub use schema::{resource_schema, AttributeSchema, CustomPropertyConfig, RESOURCE_TYPE};

pub mod types;
pub use types::{ValueType, ValuesEditableBy};
