//! HTTP cache control module
//!
//! Provides `ETag` generation, conditional request handling and the
//! `Cache-Control` policies used by the different response kinds.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag`, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Weak comparison: `W/` prefixes are ignored on both sides, a list and
/// `*` are accepted. Returns true if matched (should return 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let etag = opaque_tag(etag);
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').map(str::trim).any(|e| e == "*" || opaque_tag(e) == etag)
    })
}

fn opaque_tag(etag: &str) -> &str {
    etag.strip_prefix("W/").unwrap_or(etag)
}

/// Cache-Control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// Always revalidate; used for documents that embed tenant data
    NoCache,
    /// Never store; used for per-host JSON
    NoStore,
}

impl CachePolicy {
    /// Fingerprinted SPA assets
    pub const ASSET: Self = Self::Public(3600);

    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
            Self::NoStore => "no-store".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_consistency() {
        let etag1 = generate_etag(b"same content");
        let etag2 = generate_etag(b"same content");
        assert_eq!(etag1, etag2);
        assert!(etag1.starts_with('"') && etag1.ends_with('"'));
        assert_ne!(etag1, generate_etag(b"other content"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_weak_etags_compare_equal() {
        assert!(check_etag_match(Some("W/\"abc123\""), "\"abc123\""));
        assert!(check_etag_match(Some("\"abc123\""), "W/\"abc123\""));
        assert!(!check_etag_match(Some("W/\"abc\""), "\"abc123\""));
    }

    #[test]
    fn test_cache_policy() {
        assert_eq!(CachePolicy::ASSET.to_header_value(), "public, max-age=3600");
        assert_eq!(CachePolicy::NoCache.to_header_value(), "no-cache");
        assert_eq!(CachePolicy::NoStore.to_header_value(), "no-store");
    }
}
