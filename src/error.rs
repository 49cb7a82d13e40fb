//! Startup error type
//!
//! Request handling never fails; only loading configuration, binding the
//! listener and building the asset origin can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid origin url '{url}': {reason}")]
    InvalidOrigin { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
