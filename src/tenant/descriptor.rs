//! Subdomain descriptor
//!
//! The resolved `(category, city, state)` view of a hostname that the
//! rendering layer consumes. Resolution is total: every hostname, garbage
//! included, yields a usable descriptor.

use std::fmt;

use serde::Serialize;

use super::grammar::{classify, HostMatch};
use super::tables::TenantTables;
use super::title::{page_title, title_case};

/// Sentinel for tenants that are not scoped to one category
pub const ALL_CATEGORIES: &str = "all";
/// Sentinel for tenants that are not scoped to one city
pub const ALL_CITIES: &str = "all";

/// Tenant descriptor for one request
///
/// Fields are never absent; "no scope" is spelled with the sentinels above
/// and an unknown state is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdomainDescriptor {
    category: String,
    city: String,
    state: String,
    is_special_tenant: bool,
}

impl SubdomainDescriptor {
    /// Resolve a hostname against the tenant tables
    pub fn resolve(host: &str, tables: &TenantTables) -> Self {
        match classify(host, tables) {
            HostMatch::Special { category } => Self::category_wide(category, true),
            HostMatch::CategoryCity { category, city } => Self {
                state: tables.state_for(&city).unwrap_or_default().to_string(),
                city: title_case(&city),
                is_special_tenant: tables.is_special(&category),
                category,
            },
            HostMatch::Category { category } => Self::category_wide(category, false),
            HostMatch::Unrecognized => Self::fallback(tables),
        }
    }

    /// Descriptor used when the hostname is not a tenant
    pub fn fallback(tables: &TenantTables) -> Self {
        let category = tables.default_category().to_string();
        let is_special = tables.is_special(&category);
        Self::category_wide(category, is_special)
    }

    fn category_wide(category: String, is_special_tenant: bool) -> Self {
        Self {
            category,
            city: ALL_CITIES.to_string(),
            state: String::new(),
            is_special_tenant,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Display name of the city, or [`ALL_CITIES`]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State code, empty when unknown
    pub fn state(&self) -> &str {
        &self.state
    }

    pub const fn is_special_tenant(&self) -> bool {
        self.is_special_tenant
    }

    pub fn is_all_cities(&self) -> bool {
        self.city == ALL_CITIES
    }

    pub fn title(&self, tables: &TenantTables) -> String {
        page_title(&self.category, &self.city, &self.state, tables)
    }
}

/// `category/city[/state]`, as written to the access log
impl fmt::Display for SubdomainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.city)?;
        if !self.state.is_empty() {
            write!(f, "/{}", self.state)?;
        }
        Ok(())
    }
}
