// Directory origin
// Pre-rendered documents laid out flat: <root>/<category>.<city>.html

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::IF_NONE_MATCH;
use hyper::{Method, Response};

use super::{AssetOrigin, AssetRequest};
use crate::handler::static_files;
use crate::http::CachePolicy;

#[derive(Debug, Clone)]
pub struct DirectoryOrigin {
    root: String,
}

impl DirectoryOrigin {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
        }
    }
}

impl AssetOrigin for DirectoryOrigin {
    async fn fetch(&self, request: &AssetRequest<'_>) -> Option<Response<Full<Bytes>>> {
        let (content, content_type) =
            static_files::load_from_directory(&self.root, &request.path).await?;
        let if_none_match = request
            .headers
            .get(IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok());

        Some(static_files::build_static_file_response(
            content,
            content_type,
            if_none_match,
            CachePolicy::NoCache,
            *request.method == Method::HEAD,
        ))
    }
}
