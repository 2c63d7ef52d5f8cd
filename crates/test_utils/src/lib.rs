//! Test utilities for unit and integration tests.
//!
//! This crate provides in-memory stand-ins for the GitHub client traits and
//! naming helpers for properties created by tests.

use async_trait::async_trait;
use chrono::Utc;
use github_client::{
    models::Account, AccountClient, CustomPropertyClient, Error, OrganizationCustomProperty,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Generate a unique custom property name for a test.
///
/// Format: `{prefix}_{timestamp}_{random}`. Only characters GitHub accepts in
/// property names are used.
///
/// # Examples
///
/// ```
/// use test_utils::generate_test_property_name;
///
/// let name = generate_test_property_name("environment");
/// assert!(name.starts_with("environment_"));
/// ```
pub fn generate_test_property_name(prefix: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let random_suffix = Uuid::new_v4().simple().to_string()[..5].to_lowercase();
    format!("{}_{}_{}", prefix, timestamp, random_suffix)
}

/// The remote operations recorded by [`InMemoryCustomPropertyClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateOrUpdate,
    List,
    Remove,
}

/// A single call made against [`InMemoryCustomPropertyClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub operation: Operation,
    pub org: String,
    pub property_name: Option<String>,
    /// Request body, for create-or-update calls.
    pub body: Option<OrganizationCustomProperty>,
}

/// In-memory implementation of [`CustomPropertyClient`].
///
/// Stores property definitions per organization, records every call, and can
/// be told to fail the next call of a given operation.
#[derive(Debug, Default)]
pub struct InMemoryCustomPropertyClient {
    properties: Mutex<BTreeMap<String, Vec<OrganizationCustomProperty>>>,
    calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<HashMap<Operation, String>>,
}

impl InMemoryCustomPropertyClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a property definition as if it had been created out of band.
    pub fn insert(&self, org: &str, property: OrganizationCustomProperty) {
        let mut properties = self.properties.lock().unwrap();
        let entries = properties.entry(org.to_string()).or_default();
        upsert(entries, property);
    }

    /// Removes a property definition as if it had been deleted out of band.
    pub fn delete_remote(&self, org: &str, property_name: &str) {
        let mut properties = self.properties.lock().unwrap();
        if let Some(entries) = properties.get_mut(org) {
            entries.retain(|p| !p.has_name(property_name));
        }
    }

    /// Returns the stored definitions of an organization, in insertion order.
    pub fn properties(&self, org: &str) -> Vec<OrganizationCustomProperty> {
        self.properties
            .lock()
            .unwrap()
            .get(org)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of calls made for the given operation.
    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Makes the next call of `operation` fail with `Error::ApiError(message)`.
    pub fn fail_next(&self, operation: Operation, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, message.to_string());
    }

    fn record(
        &self,
        operation: Operation,
        org: &str,
        property_name: Option<&str>,
        body: Option<&OrganizationCustomProperty>,
    ) -> Result<(), Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation,
            org: org.to_string(),
            property_name: property_name.map(str::to_string),
            body: body.cloned(),
        });

        match self.failures.lock().unwrap().remove(&operation) {
            Some(message) => Err(Error::ApiError(message)),
            None => Ok(()),
        }
    }
}

fn upsert(entries: &mut Vec<OrganizationCustomProperty>, property: OrganizationCustomProperty) {
    let name = property.property_name.clone().unwrap_or_default();
    match entries.iter_mut().find(|p| p.has_name(&name)) {
        Some(existing) => *existing = property,
        None => entries.push(property),
    }
}

#[async_trait]
impl CustomPropertyClient for InMemoryCustomPropertyClient {
    async fn create_or_update_org_custom_property(
        &self,
        org: &str,
        property_name: &str,
        property: &OrganizationCustomProperty,
    ) -> Result<OrganizationCustomProperty, Error> {
        self.record(
            Operation::CreateOrUpdate,
            org,
            Some(property_name),
            Some(property),
        )?;

        // GitHub fills in the name from the path and reports where the property lives.
        let stored = OrganizationCustomProperty {
            property_name: Some(property_name.to_string()),
            required: Some(property.required.unwrap_or(false)),
            source_type: Some("organization".to_string()),
            url: Some(format!(
                "https://api.github.com/orgs/{}/properties/schema/{}",
                org, property_name
            )),
            ..property.clone()
        };

        debug!(org = org, property_name = property_name, "Stored property");
        self.insert(org, stored.clone());
        Ok(stored)
    }

    async fn list_org_custom_properties(
        &self,
        org: &str,
    ) -> Result<Vec<OrganizationCustomProperty>, Error> {
        self.record(Operation::List, org, None, None)?;
        Ok(self.properties(org))
    }

    async fn remove_org_custom_property(
        &self,
        org: &str,
        property_name: &str,
    ) -> Result<(), Error> {
        self.record(Operation::Remove, org, Some(property_name), None)?;

        let mut properties = self.properties.lock().unwrap();
        let entries = properties.entry(org.to_string()).or_default();
        let before = entries.len();
        entries.retain(|p| !p.has_name(property_name));
        if entries.len() == before {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

/// In-memory implementation of [`AccountClient`] backed by a fixed set of accounts.
#[derive(Debug, Default)]
pub struct StaticAccountClient {
    accounts: HashMap<String, Account>,
}

impl StaticAccountClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an organization account.
    pub fn with_organization(mut self, login: &str) -> Self {
        self.accounts
            .insert(login.to_string(), account(login, "Organization"));
        self
    }

    /// Adds a user account.
    pub fn with_user(mut self, login: &str) -> Self {
        self.accounts.insert(login.to_string(), account(login, "User"));
        self
    }
}

fn account(login: &str, account_type: &str) -> Account {
    Account {
        id: 1,
        login: login.to_string(),
        account_type: account_type.to_string(),
        node_id: String::new(),
    }
}

#[async_trait]
impl AccountClient for StaticAccountClient {
    async fn get_account(&self, login: &str) -> Result<Account, Error> {
        self.accounts.get(login).cloned().ok_or(Error::NotFound)
    }
}
