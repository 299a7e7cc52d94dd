//! Header helpers for upload requests.

use axum::http::{header, HeaderMap};

/// Extension trait for reading request headers.
pub trait HeaderMapExt {
    /// Get a header value as a string, returning None if missing.
    fn get_str(&self, name: &str) -> Option<&str>;

    /// The declared `Content-Type`, if any.
    fn content_type(&self) -> Option<&str>;
}

impl HeaderMapExt for HeaderMap {
    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    fn content_type(&self) -> Option<&str> {
        self.get_str(header::CONTENT_TYPE.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
