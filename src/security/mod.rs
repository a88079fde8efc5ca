//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → handler preflight / method gate
//!     → api_key.rs (X-API-Key check, 401 on mismatch)
//!     → bounded body read (413 past security.max_body_size)
//!     → payload validation
//! ```
//!
//! # Design Decisions
//! - Fail closed: an unset key rejects every caller
//! - Secrets never appear in Debug output or logs

pub mod api_key;

pub use api_key::{ApiKey, X_API_KEY};
