//! near-me.us edge server
//!
//! Resolves `<category>.<city>.near-me.us` hostnames to tenants, serves
//! pre-rendered tenant documents from an asset origin, and falls back to
//! the SPA with the tenant descriptor injected.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod origin;
pub mod server;
pub mod tenant;
