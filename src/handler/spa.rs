//! SPA handlers
//!
//! Everything the edge router passes through ends up here: the tenant JSON
//! endpoint and the SPA entry document, both carrying the request's
//! resolved descriptor.

use crate::handler::router::RequestContext;
use crate::handler::static_files;
use crate::http::{self, CachePolicy};
use crate::tenant::{SubdomainDescriptor, TenantTables};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Global the SPA reads its descriptor from
const TENANT_GLOBAL: &str = "window.__TENANT__";

/// Body of the tenant JSON endpoint
#[derive(Debug, Serialize)]
pub struct TenantPayload<'a> {
    pub descriptor: &'a SubdomainDescriptor,
    pub title: String,
}

/// Serve the resolved descriptor as JSON
pub fn serve_tenant(ctx: &RequestContext<'_>, tables: &TenantTables) -> Response<Full<Bytes>> {
    let payload = TenantPayload {
        descriptor: ctx.descriptor,
        title: ctx.descriptor.title(tables),
    };
    match serde_json::to_string(&payload) {
        Ok(json) => http::build_json_response(json, ctx.is_head),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to encode tenant payload: {e}"));
            http::build_json_response("{}".to_string(), ctx.is_head)
        }
    }
}

/// Serve the SPA entry document for the request's tenant
pub async fn serve_entry(
    ctx: &RequestContext<'_>,
    root: &str,
    index: &str,
    tables: &TenantTables,
) -> Response<Full<Bytes>> {
    let title = ctx.descriptor.title(tables);
    let template = match fs::read_to_string(Path::new(root).join(index)).await {
        Ok(t) => t,
        Err(e) => {
            crate::logger::log_warning(&format!("SPA entry '{root}/{index}' unavailable: {e}"));
            default_entry_page()
        }
    };
    let html = render_entry(&template, &title, ctx.descriptor);

    static_files::build_static_file_response(
        html.into_bytes(),
        "text/html; charset=utf-8",
        ctx.if_none_match.as_deref(),
        CachePolicy::NoCache,
        ctx.is_head,
    )
}

/// Substitute the `<title>` and inject the descriptor before `</head>`
pub fn render_entry(template: &str, title: &str, descriptor: &SubdomainDescriptor) -> String {
    let mut html = replace_title(template, &escape_html(title));

    let json = serde_json::to_string(descriptor).unwrap_or_else(|_| "null".to_string());
    let script = format!(
        "<script>{TENANT_GLOBAL} = {};</script>",
        escape_script_json(&json)
    );
    match html.find("</head>") {
        Some(pos) => html.insert_str(pos, &script),
        None => html.insert_str(0, &script),
    }
    html
}

fn replace_title(template: &str, title: &str) -> String {
    let (Some(start), Some(end)) = (template.find("<title>"), template.find("</title>")) else {
        return template.to_string();
    };
    let content_start = start + "<title>".len();
    if end < content_start {
        return template.to_string();
    }
    format!("{}{title}{}", &template[..content_start], &template[end..])
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Keep `</script>` and friends from terminating the inline script
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Entry page used when the SPA build is missing
fn default_entry_page() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>near-me.us</title>
</head>
<body>
    <div id="root"></div>
</body>
</html>"#,
    )
}
