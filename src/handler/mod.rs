//! Request handler module
//!
//! The edge router gets the first look at every request; whatever it passes
//! through is served by the SPA handlers and the static asset directory.

pub mod edge;
pub mod router;
pub mod spa;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
