// Configuration module entry point
// Loads application configuration and owns the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, OriginConfig, PerformanceConfig, ServerConfig, SpaConfig,
    TenancyConfig,
};

/// Environment variable prefix, e.g. `NEARME__SERVER__PORT=9000`
const ENV_PREFIX: &str = "NEARME";

/// Keys whose environment value is a comma-separated list,
/// e.g. `NEARME__TENANCY__SPECIAL_CATEGORIES=water-refill,ev-charging`
const ENV_LIST_KEYS: &[&str] = &["tenancy.special_categories", "tenancy.reserved_labels"];

/// Environment source; `vars` replaces the process environment when given
fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
    ENV_LIST_KEYS.iter().fold(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .source(vars),
        |env, key| env.with_list_parse_key(key),
    )
}

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        Self::load_with_env(config_path, None)
    }

    fn load_with_env(
        config_path: &str,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment(vars))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "nearme-edge/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.tenancy, TenancyConfig::default());
        assert_eq!(cfg.spa.tenant_path, "/api/tenant");
        assert!(!cfg.http.trust_forwarded_host);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [tenancy]
            default_category = "nail-salons"

            [origin]
            type = "dir"
            path = "prerendered"
            "#,
        )
        .unwrap();

        let stem = path.with_extension("");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.tenancy.default_category, "nail-salons");
        assert_eq!(cfg.tenancy.root_label, "near-me");
        assert_eq!(
            cfg.origin,
            OriginConfig::Dir {
                path: "prerendered".to_string()
            }
        );
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 9090);
    }

    #[test]
    fn test_env_overrides_lists_and_scalars() {
        let vars = config::Map::from([
            (
                "NEARME__TENANCY__SPECIAL_CATEGORIES".to_string(),
                "water-refill,ev-charging".to_string(),
            ),
            ("NEARME__TENANCY__RESERVED_LABELS".to_string(), "www".to_string()),
            ("NEARME__SERVER__PORT".to_string(), "9000".to_string()),
        ]);
        let cfg = Config::load_with_env("does-not-exist/config", Some(vars)).unwrap();
        assert_eq!(
            cfg.tenancy.special_categories,
            vec!["water-refill".to_string(), "ev-charging".to_string()]
        );
        assert_eq!(cfg.tenancy.reserved_labels, vec!["www".to_string()]);
        assert_eq!(cfg.server.port, 9000);
        // Untouched keys keep their defaults
        assert_eq!(cfg.tenancy.root_label, "near-me");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist/config").unwrap();
        cfg.server.host = "not an address".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }
}
