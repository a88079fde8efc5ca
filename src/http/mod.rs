//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handler.rs (preflight, method gate, auth, validation, translate)
//!     → response.rs (JSON envelope, status mapping)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{translate_handler, TranslationPayload};
pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::{ApiError, TranslationResponse};
pub use server::{build_router, AppState, HttpServer};
