//! Tenant resolution
//!
//! Turns a hostname into the tenant it addresses:
//! - `grammar`: the single hostname classification rule table
//! - `tables`: special categories, city→state lookup, suffix tokens
//! - `descriptor`: the `(category, city, state)` value handed to rendering
//! - `title`: page titles derived from a descriptor

mod descriptor;
mod grammar;
mod tables;
mod title;

pub use descriptor::{SubdomainDescriptor, ALL_CATEGORIES, ALL_CITIES};
pub use grammar::{classify, classify_with_rule, normalize_host, HostMatch};
pub use tables::TenantTables;
pub use title::{category_label, page_title, title_case};
