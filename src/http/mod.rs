//! HTTP protocol layer module
//!
//! Protocol helpers shared by the edge router, the asset origins and the
//! SPA handlers, decoupled from tenant logic.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use response::{
    build_304_response, build_405_response, build_413_response,
    build_cached_response, build_health_response, build_json_response, build_options_response,
};
