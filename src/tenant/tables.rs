//! Static tenant tables
//!
//! Loaded once at startup from the `tenancy` config section and passed by
//! reference into every classification call.

use std::collections::{HashMap, HashSet};

use crate::config::TenancyConfig;

/// City slug → state code for the cities the directory launched with.
/// `tenancy.city_states` entries are merged over this table.
const BUILTIN_CITY_STATES: &[(&str, &str)] = &[
    ("atlanta", "GA"),
    ("austin", "TX"),
    ("boston", "MA"),
    ("charlotte", "NC"),
    ("chicago", "IL"),
    ("columbus", "OH"),
    ("dallas", "TX"),
    ("denver", "CO"),
    ("fort-worth", "TX"),
    ("houston", "TX"),
    ("jacksonville", "FL"),
    ("las-vegas", "NV"),
    ("los-angeles", "CA"),
    ("miami", "FL"),
    ("nashville", "TN"),
    ("new-york", "NY"),
    ("orlando", "FL"),
    ("philadelphia", "PA"),
    ("phoenix", "AZ"),
    ("portland", "OR"),
    ("san-antonio", "TX"),
    ("san-diego", "CA"),
    ("san-francisco", "CA"),
    ("san-jose", "CA"),
    ("seattle", "WA"),
];

/// Immutable lookup tables behind hostname resolution
#[derive(Debug, Clone)]
pub struct TenantTables {
    root_label: String,
    tld: String,
    default_category: String,
    special: HashSet<String>,
    reserved: HashSet<String>,
    display_names: HashMap<String, String>,
    city_states: HashMap<String, String>,
}

impl TenantTables {
    pub fn from_config(cfg: &TenancyConfig) -> Self {
        let mut city_states: HashMap<String, String> = BUILTIN_CITY_STATES
            .iter()
            .map(|(city, state)| ((*city).to_string(), (*state).to_string()))
            .collect();
        city_states.extend(
            cfg.city_states
                .iter()
                .map(|(city, state)| (city.to_ascii_lowercase(), state.clone())),
        );

        Self {
            root_label: cfg.root_label.to_ascii_lowercase(),
            tld: cfg.tld.to_ascii_lowercase(),
            default_category: cfg.default_category.to_ascii_lowercase(),
            special: lowercase_set(&cfg.special_categories),
            reserved: lowercase_set(&cfg.reserved_labels),
            display_names: cfg
                .display_names
                .iter()
                .map(|(slug, name)| (slug.to_ascii_lowercase(), name.clone()))
                .collect(),
            city_states,
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn is_special(&self, category: &str) -> bool {
        self.special.contains(category)
    }

    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved.contains(label)
    }

    pub fn display_name(&self, category: &str) -> Option<&str> {
        self.display_names.get(category).map(String::as_str)
    }

    /// State code for a city slug
    pub fn state_for(&self, city_slug: &str) -> Option<&str> {
        self.city_states.get(city_slug).map(String::as_str)
    }

    pub fn special_count(&self) -> usize {
        self.special.len()
    }

    pub fn city_count(&self) -> usize {
        self.city_states.len()
    }
}

impl Default for TenantTables {
    fn default() -> Self {
        Self::from_config(&TenancyConfig::default())
    }
}

fn lowercase_set(values: &[String]) -> HashSet<String> {
    values.iter().map(|v| v.to_ascii_lowercase()).collect()
}
