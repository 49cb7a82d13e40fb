//! Static file serving module
//!
//! Loads files from a root directory without letting a request path
//! escape it, and answers with `ETag`-aware responses.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, CachePolicy};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve a file below `root`, or `None` if there is no such file
pub async fn serve_directory(ctx: &RequestContext<'_>, root: &str) -> Option<Response<Full<Bytes>>> {
    let (content, content_type) = load_from_directory(root, ctx.path).await?;
    Some(build_static_file_response(
        content,
        content_type,
        ctx.if_none_match.as_deref(),
        CachePolicy::ASSET,
        ctx.is_head,
    ))
}

/// Load a regular file below `root`
///
/// `path` is a request path (`/assets/app.js`). Directories, missing files
/// and anything resolving outside `root` yield `None`.
pub async fn load_from_directory(root: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let relative_path = path.trim_start_matches('/');
    if relative_path.is_empty() {
        return None;
    }

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{root}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let Ok(file_path) = root_canonical.join(relative_path).canonicalize() else {
        return None;
    };
    if !file_path.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path.display()
        ));
        return None;
    }
    if !file_path.is_file() {
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build a 200 (or 304 on `If-None-Match` hit) for file content
pub fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    policy: CachePolicy,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag, policy);
    }

    http::build_cached_response(Bytes::from(data), content_type, &etag, policy, is_head)
}
