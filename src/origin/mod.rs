//! Asset origins
//!
//! Where the edge router looks for pre-rendered tenant documents. An origin
//! answers with a response (any status) or `None` when it could not produce
//! one at all; the router decides what counts as a hit.

mod dir;
mod remote;

use std::future::Future;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Method, Response};

use crate::config::OriginConfig;
use crate::error::ServerError;

pub use dir::DirectoryOrigin;
pub use remote::HttpOrigin;

/// The slice of the inbound request forwarded to an origin
#[derive(Debug)]
pub struct AssetRequest<'a> {
    /// Origin path, e.g. `/nail-salons.dallas.html`
    pub path: String,
    pub method: &'a Method,
    pub headers: &'a HeaderMap,
}

/// Fetch capability against a static asset origin
pub trait AssetOrigin {
    /// One attempt, no retry
    fn fetch(
        &self,
        request: &AssetRequest<'_>,
    ) -> impl Future<Output = Option<Response<Full<Bytes>>>>;
}

/// Origin selected by configuration
#[derive(Debug)]
pub enum Origin {
    Dir(DirectoryOrigin),
    Http(HttpOrigin),
}

impl Origin {
    pub fn from_config(cfg: &OriginConfig) -> Result<Self, ServerError> {
        match cfg {
            OriginConfig::Dir { path } => Ok(Self::Dir(DirectoryOrigin::new(path))),
            OriginConfig::Http { url } => Ok(Self::Http(HttpOrigin::new(url)?)),
        }
    }
}

impl AssetOrigin for Origin {
    async fn fetch(&self, request: &AssetRequest<'_>) -> Option<Response<Full<Bytes>>> {
        match self {
            Self::Dir(origin) => origin.fetch(request).await,
            Self::Http(origin) => origin.fetch(request).await,
        }
    }
}
