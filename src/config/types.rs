// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub tenancy: TenancyConfig,
    #[serde(default)]
    pub origin: OriginConfig,
    #[serde(default)]
    pub spa: SpaConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
    /// Prefer `X-Forwarded-Host` over `Host` (only behind a trusted proxy)
    #[serde(default)]
    pub trust_forwarded_host: bool,
}

/// Hostname grammar and the static tenant tables
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TenancyConfig {
    /// Platform root label, the `near-me` in `near-me.us`
    pub root_label: String,
    /// Top-level label, the `us` in `near-me.us`
    pub tld: String,
    /// Category of the fallback descriptor
    pub default_category: String,
    /// Category slugs with bespoke, city-agnostic sites
    pub special_categories: Vec<String>,
    /// Platform labels that never name a category (`www`, `app`, ...)
    pub reserved_labels: Vec<String>,
    /// Display names overriding the title-cased category slug
    pub display_names: HashMap<String, String>,
    /// City slug to state code, merged over the built-in table
    pub city_states: HashMap<String, String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            root_label: "near-me".to_string(),
            tld: "us".to_string(),
            default_category: crate::tenant::ALL_CATEGORIES.to_string(),
            special_categories: vec!["water-refill".to_string()],
            reserved_labels: ["www", "app", "api", "admin"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            display_names: HashMap::from([(
                "water-refill".to_string(),
                "Water Refill Stations".to_string(),
            )]),
            city_states: HashMap::new(),
        }
    }
}

/// Where pre-rendered tenant documents are fetched from
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OriginConfig {
    /// Local directory of `<category>.<city>.html` documents
    Dir { path: String },
    /// Remote static origin, plain HTTP
    Http { url: String },
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self::Dir {
            path: "dist".to_string(),
        }
    }
}

/// Single-page application served on pass-through
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpaConfig {
    /// Directory holding the built SPA
    pub root: String,
    /// Entry document, relative to `root`
    pub index: String,
    pub health_path: String,
    /// JSON endpoint exposing the resolved descriptor
    pub tenant_path: String,
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            root: "dist".to_string(),
            index: "index.html".to_string(),
            health_path: "/healthz".to_string(),
            tenant_path: "/api/tenant".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenancy_defaults() {
        let tenancy = TenancyConfig::default();
        assert_eq!(tenancy.root_label, "near-me");
        assert_eq!(tenancy.tld, "us");
        assert_eq!(tenancy.default_category, "all");
        assert!(tenancy.special_categories.contains(&"water-refill".to_string()));
        assert!(tenancy.reserved_labels.contains(&"www".to_string()));
    }

    #[test]
    fn test_tenancy_partial_toml_keeps_defaults() {
        let tenancy: TenancyConfig = toml::from_str(
            r#"
            special_categories = ["water-refill", "ev-charging"]

            [city_states]
            plano = "TX"
            "#,
        )
        .unwrap();
        assert_eq!(tenancy.root_label, "near-me");
        assert_eq!(tenancy.special_categories.len(), 2);
        assert_eq!(tenancy.city_states.get("plano").map(String::as_str), Some("TX"));
    }

    #[test]
    fn test_origin_tagged() {
        let origin: OriginConfig = toml::from_str(
            r#"
            type = "http"
            url = "http://127.0.0.1:8788"
            "#,
        )
        .unwrap();
        assert_eq!(
            origin,
            OriginConfig::Http {
                url: "http://127.0.0.1:8788".to_string()
            }
        );
        assert_eq!(
            OriginConfig::default(),
            OriginConfig::Dir {
                path: "dist".to_string()
            }
        );
    }
}
