//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → timeouts.rs (deadline around the upstream call)
//!     → translator
//! ```
//!
//! # Design Decisions
//! - One attempt per request: failures surface to the caller, never retried

pub mod timeouts;
