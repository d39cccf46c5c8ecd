use axum::http::{
    HeaderName, HeaderValue,
    header::{CACHE_CONTROL, EXPIRES, PRAGMA, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
};

/// Headers stamped on every response so timer state is never served from a cache.
pub fn no_cache_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
        ),
        (PRAGMA, HeaderValue::from_static("no-cache")),
        (EXPIRES, HeaderValue::from_static("0")),
    ]
}

/// Extra hardening headers, production only.
pub fn production_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
    ]
}

pub fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}
