//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream translation calls with a deadline
//! - Cancel the in-flight call cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other upstream errors
//! - The router-level TimeoutLayer stays as an outer bound on the whole request

use std::future::Future;
use std::time::Duration;

use crate::translate::TranslatorError;

/// Run an upstream call, failing with [`TranslatorError::Timeout`] once
/// `limit` elapses. The inner future is dropped on timeout.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, TranslatorError>
where
    F: Future<Output = Result<T, TranslatorError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(TranslatorError::Timeout(limit)),
    }
}
