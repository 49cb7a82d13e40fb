//! Edge router
//!
//! First stop for every request. When the hostname is a category+city
//! tenant and the asset origin has a pre-rendered document for it, that
//! document is the response, whatever path was requested. In every other
//! case the request continues down the handler chain untouched; nothing
//! here ever turns into an error for the client.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Method, Response, StatusCode};

use crate::logger;
use crate::origin::{AssetOrigin, AssetRequest};
use crate::tenant::{classify, HostMatch, TenantTables};

/// What the edge router decided for one request
#[derive(Debug)]
pub enum EdgeOutcome {
    /// Origin response, returned to the client verbatim
    Serve(Response<Full<Bytes>>),
    /// Hand the request to the next handler
    PassThrough,
}

/// Origin path of the pre-rendered document for a tenant
pub fn document_path(category: &str, city: &str) -> String {
    format!("/{category}.{city}.html")
}

/// Try to answer the request with the tenant's pre-rendered document
///
/// At most one origin fetch, and only for category+city hostnames.
pub async fn route<O: AssetOrigin>(
    host: &str,
    method: &Method,
    headers: &HeaderMap,
    tables: &TenantTables,
    origin: &O,
) -> EdgeOutcome {
    let HostMatch::CategoryCity { category, city } = classify(host, tables) else {
        return EdgeOutcome::PassThrough;
    };

    let request = AssetRequest {
        path: document_path(&category, &city),
        method,
        headers,
    };

    match origin.fetch(&request).await {
        Some(response) if is_hit(response.status()) => {
            logger::log_debug(&format!("[Edge] {host} -> {} ({})", request.path, response.status()));
            EdgeOutcome::Serve(response)
        }
        Some(response) => {
            logger::log_debug(&format!(
                "[Edge] {host}: origin answered {} for {}, passing through",
                response.status(),
                request.path
            ));
            EdgeOutcome::PassThrough
        }
        None => {
            logger::log_debug(&format!("[Edge] {host}: no document at {}, passing through", request.path));
            EdgeOutcome::PassThrough
        }
    }
}

/// 2xx, or 304 which confirms the document exists and is cached
fn is_hit(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_MODIFIED
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Origin backed by a fixed path → (status, body) table that records
    /// every fetch
    struct RecordingOrigin {
        documents: HashMap<String, (u16, &'static str)>,
        fetched: RefCell<Vec<(String, Method)>>,
        reachable: bool,
    }

    impl RecordingOrigin {
        fn new(documents: &[(&str, u16, &'static str)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(path, status, body)| ((*path).to_string(), (*status, *body)))
                    .collect(),
                fetched: RefCell::new(Vec::new()),
                reachable: true,
            }
        }

        fn unreachable() -> Self {
            Self {
                reachable: false,
                ..Self::new(&[])
            }
        }

        fn fetched_paths(&self) -> Vec<String> {
            self.fetched.borrow().iter().map(|(p, _)| p.clone()).collect()
        }
    }

    impl AssetOrigin for RecordingOrigin {
        async fn fetch(&self, request: &AssetRequest<'_>) -> Option<Response<Full<Bytes>>> {
            self.fetched
                .borrow_mut()
                .push((request.path.clone(), request.method.clone()));
            if !self.reachable {
                return None;
            }
            let (status, body) = self
                .documents
                .get(&request.path)
                .copied()
                .unwrap_or((404, "not found"));
            Some(
                Response::builder()
                    .status(status)
                    .header("x-served-by", "origin")
                    .body(Full::new(Bytes::from(body)))
                    .unwrap(),
            )
        }
    }

    async fn run(host: &str, origin: &RecordingOrigin) -> EdgeOutcome {
        let tables = TenantTables::default();
        route(host, &Method::GET, &HeaderMap::new(), &tables, origin).await
    }

    #[test]
    fn test_document_path() {
        assert_eq!(document_path("nail-salons", "dallas"), "/nail-salons.dallas.html");
    }

    #[tokio::test]
    async fn test_serves_existing_document_verbatim() {
        let origin = RecordingOrigin::new(&[("/nail-salons.dallas.html", 200, "<h1>Nail Salons in Dallas</h1>")]);

        let EdgeOutcome::Serve(resp) = run("nail-salons.dallas.near-me.us", &origin).await else {
            panic!("expected the pre-rendered document");
        };
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["x-served-by"], "origin");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from("<h1>Nail Salons in Dallas</h1>"));
        assert_eq!(origin.fetched_paths(), vec!["/nail-salons.dallas.html"]);
    }

    #[tokio::test]
    async fn test_missing_document_passes_through() {
        let origin = RecordingOrigin::new(&[]);
        let outcome = run("nail-salons.dallas.near-me.us", &origin).await;
        assert!(matches!(outcome, EdgeOutcome::PassThrough));
        assert_eq!(origin.fetched_paths().len(), 1);
    }

    #[tokio::test]
    async fn test_origin_errors_pass_through() {
        let origin = RecordingOrigin::new(&[("/nail-salons.dallas.html", 500, "boom")]);
        assert!(matches!(
            run("nail-salons.dallas.near-me.us", &origin).await,
            EdgeOutcome::PassThrough
        ));

        let origin = RecordingOrigin::unreachable();
        assert!(matches!(
            run("nail-salons.dallas.near-me.us", &origin).await,
            EdgeOutcome::PassThrough
        ));
        assert_eq!(origin.fetched_paths().len(), 1);
    }

    #[tokio::test]
    async fn test_not_modified_is_served() {
        let origin = RecordingOrigin::new(&[("/nail-salons.dallas.html", 304, "")]);
        let EdgeOutcome::Serve(resp) = run("nail-salons.dallas.near-me.us", &origin).await else {
            panic!("expected 304 to be forwarded");
        };
        assert_eq!(resp.status(), 304);
    }

    #[tokio::test]
    async fn test_non_tenant_hosts_never_fetch() {
        let origin = RecordingOrigin::new(&[("/app.html", 200, "app")]);
        for host in [
            "app.near-me.us",
            "water-refill.near-me.us",
            "water-refill.dallas.near-me.us",
            "barbers.near-me.us",
            "localhost",
            "192.168.1.1",
            "foo.bar.baz.qux",
            "",
        ] {
            assert!(
                matches!(run(host, &origin).await, EdgeOutcome::PassThrough),
                "host: {host:?}"
            );
        }
        assert!(origin.fetched_paths().is_empty());
    }

    #[tokio::test]
    async fn test_extra_leading_labels_use_suffix_labels() {
        let origin = RecordingOrigin::new(&[("/nail-salons.dallas.html", 200, "doc")]);
        let outcome = run("www.nail-salons.dallas.near-me.us:443", &origin).await;
        assert!(matches!(outcome, EdgeOutcome::Serve(_)));
        assert_eq!(origin.fetched_paths(), vec!["/nail-salons.dallas.html"]);
    }

    #[tokio::test]
    async fn test_forwards_request_method() {
        let origin = RecordingOrigin::new(&[("/nail-salons.dallas.html", 200, "doc")]);
        let tables = TenantTables::default();
        let _ = route(
            "nail-salons.dallas.near-me.us",
            &Method::HEAD,
            &HeaderMap::new(),
            &tables,
            &origin,
        )
        .await;
        assert_eq!(origin.fetched.borrow()[0].1, Method::HEAD);
    }
}
