//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: resolves the tenant once,
//! validates the request, answers the fixed endpoints and existing SPA
//! assets, then lets the edge router pick a pre-rendered document before
//! falling back to the SPA entry.

use crate::config::AppState;
use crate::handler::edge::{self, EdgeOutcome};
use crate::handler::{spa, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::tenant::{normalize_host, SubdomainDescriptor};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HOST, IF_NONE_MATCH};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    /// Resolved once per request, read-only afterwards
    pub descriptor: &'a SubdomainDescriptor,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B: Body>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let host = request_host(&req, state.config.http.trust_forwarded_host);
    let descriptor = SubdomainDescriptor::resolve(&host, &state.tables);

    let (response, edge_hit) = dispatch(&req, &host, &descriptor, &state).await;
    let response = with_server_header(response, &state.config.http.server_name);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.host = host;
        entry.tenant = descriptor.to_string();
        entry.edge_hit = edge_hit;
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().lower()).unwrap_or(usize::MAX);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run the handler chain; the flag reports whether the edge router answered
async fn dispatch<B: Body>(
    req: &Request<B>,
    host: &str,
    descriptor: &SubdomainDescriptor,
    state: &Arc<AppState>,
) -> (Response<Full<Bytes>>, bool) {
    let method = req.method();

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return (resp, false);
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return (resp, false);
    }

    // 3. Health check, never shadowed by tenant documents
    let path = req.uri().path();
    let spa_cfg = &state.config.spa;
    if path == spa_cfg.health_path {
        return (http::build_health_response("ok"), false);
    }

    let ctx = RequestContext {
        path,
        is_head: *method == Method::HEAD,
        if_none_match: req
            .headers()
            .get(IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        descriptor,
    };

    // 4. Tenant endpoint
    if path == spa_cfg.tenant_path {
        return (spa::serve_tenant(&ctx, &state.tables), false);
    }

    // 5. SPA assets that exist win over the tenant document
    if let Some(resp) = static_files::serve_directory(&ctx, &spa_cfg.root).await {
        return (resp, false);
    }

    // 6. Edge router: pre-rendered tenant document
    if let EdgeOutcome::Serve(resp) =
        edge::route(host, method, req.headers(), &state.tables, &state.origin).await
    {
        return (resp, true);
    }

    // 7. SPA entry document
    (
        spa::serve_entry(&ctx, &spa_cfg.root, &spa_cfg.index, &state.tables).await,
        false,
    )
}

/// Hostname the request was addressed to, normalized; empty if none
pub fn request_host<B>(req: &Request<B>, trust_forwarded_host: bool) -> String {
    let header = |name: &HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
    };

    let forwarded = if trust_forwarded_host {
        // First entry when a proxy chain appended several
        header(&X_FORWARDED_HOST).and_then(|v| v.split(',').next())
    } else {
        None
    };

    forwarded
        .or_else(|| header(&HOST))
        .or_else(|| req.uri().host())
        .map(normalize_host)
        .unwrap_or_default()
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn with_server_header(mut response: Response<Full<Bytes>>, server_name: &str) -> Response<Full<Bytes>> {
    if let Ok(value) = server_name.parse() {
        response.headers_mut().insert(hyper::header::SERVER, value);
    }
    response
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
