// HTTP origin
// Forwards the document request to a remote static host over plain HTTP

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{HeaderName, HOST};
use hyper::{Request, Response, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use super::{AssetOrigin, AssetRequest};
use crate::error::ServerError;
use crate::logger;

/// Headers that describe a single connection and must not be forwarded
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

pub struct HttpOrigin {
    /// `host[:port]` of the origin, also sent as `Host`
    authority: String,
    /// Path prefix without trailing slash, may be empty
    base_path: String,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl std::fmt::Debug for HttpOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOrigin")
            .field("authority", &self.authority)
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

impl HttpOrigin {
    pub fn new(url: &str) -> Result<Self, ServerError> {
        let invalid = |reason: &str| ServerError::InvalidOrigin {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| invalid(&e.to_string()))?;
        if uri.scheme_str() != Some("http") {
            return Err(invalid("only http:// origins are supported"));
        }
        let authority = uri
            .authority()
            .ok_or_else(|| invalid("missing host"))?
            .to_string();

        Ok(Self {
            authority,
            base_path: uri.path().trim_end_matches('/').to_string(),
            client: Client::builder(TokioExecutor::new()).build_http(),
        })
    }

    fn build_request(&self, request: &AssetRequest<'_>) -> Option<Request<Full<Bytes>>> {
        let uri = format!("http://{}{}{}", self.authority, self.base_path, request.path);
        let mut builder = Request::builder().method(request.method.clone()).uri(uri);
        for (name, value) in request.headers {
            if *name == HOST || is_hop_by_hop(name) {
                continue;
            }
            builder = builder.header(name, value);
        }
        builder
            .header(HOST, self.authority.as_str())
            .body(Full::new(Bytes::new()))
            .map_err(|e| logger::log_error(&format!("Failed to build origin request: {e}")))
            .ok()
    }
}

impl AssetOrigin for HttpOrigin {
    async fn fetch(&self, request: &AssetRequest<'_>) -> Option<Response<Full<Bytes>>> {
        let outbound = self.build_request(request)?;

        let response = match self.client.request(outbound).await {
            Ok(r) => r,
            Err(e) => {
                logger::log_debug(&format!(
                    "Origin {} unreachable for {}: {e}",
                    self.authority, request.path
                ));
                return None;
            }
        };

        let (mut parts, body) = response.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                logger::log_debug(&format!("Origin body read failed for {}: {e}", request.path));
                return None;
            }
        };

        let hop_by_hop: Vec<HeaderName> = parts
            .headers
            .keys()
            .filter(|name| is_hop_by_hop(name))
            .cloned()
            .collect();
        for name in hop_by_hop {
            parts.headers.remove(name);
        }

        Some(Response::from_parts(parts, Full::new(body)))
    }
}
