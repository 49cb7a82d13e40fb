// Application state module
// Immutable per-process state shared by every connection

use super::types::Config;
use crate::error::ServerError;
use crate::origin::Origin;
use crate::tenant::TenantTables;

/// Application state
///
/// Built once at startup and handed to connections behind an `Arc`.
/// Nothing in here is mutated after construction.
pub struct AppState {
    pub config: Config,
    /// Special-category set, city→state table and the hostname suffix
    pub tables: TenantTables,
    /// Where pre-rendered tenant documents come from
    pub origin: Origin,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        Ok(Self {
            config: config.clone(),
            tables: TenantTables::from_config(&config.tenancy),
            origin: Origin::from_config(&config.origin)?,
        })
    }
}
