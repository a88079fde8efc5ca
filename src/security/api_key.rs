//! Static API key check.
//!
//! Callers present the shared secret in `X-API-Key`. The comparison is
//! constant-time in the contents; only a length mismatch exits early.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

/// Header carrying the caller's key.
pub const X_API_KEY: &str = "x-api-key";

/// The configured secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Check a presented key. An empty configured key matches nothing.
    pub fn verify(&self, presented: &str) -> bool {
        !self.0.is_empty() && bool::from(self.0.as_bytes().ct_eq(presented.as_bytes()))
    }

    /// Check the `X-API-Key` header. Missing or non-ASCII values fail.
    pub fn verify_headers(&self, headers: &HeaderMap) -> bool {
        headers
            .get(X_API_KEY)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|presented| self.verify(presented))
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
