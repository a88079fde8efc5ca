//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Define the JSON envelope returned for every POST
//! - Map handler errors to HTTP status codes
//! - Build the CORS preflight response
//!
//! # Design Decisions
//! - Every error is terminal and reported as `{success: false, error}`
//! - An error with an empty message is reported as "Unknown error"

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::translate::{TranslationRequest, TranslatorError};

/// Allowed methods advertised on preflight.
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
/// Allowed request headers advertised on preflight.
pub const ALLOW_HEADERS: &str = "Content-Type, X-API-Key";

/// JSON envelope for every non-preflight response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<TranslationRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResponse {
    pub fn translated(original: TranslationRequest, translation: String) -> Self {
        Self {
            success: true,
            original: Some(original),
            translation: Some(translation),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            original: None,
            translation: None,
            error: Some(error.into()),
        }
    }
}

impl IntoResponse for TranslationResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Everything that can end a request other than a successful translation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Text field is required")]
    MissingText,

    #[error("Target language is required")]
    MissingTargetLang,

    #[error("Payload too large")]
    PayloadTooLarge,

    /// The connection failed while the body was being read.
    #[error("{0}")]
    BodyRead(String),

    /// A field was present and truthy but not a string.
    #[error("{field} must be a string, got {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },

    /// Body was not a JSON object of the expected shape.
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{0}")]
    Translation(#[from] TranslatorError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingText | ApiError::MissingTargetLang => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MalformedBody(_)
            | ApiError::BodyRead(_)
            | ApiError::InvalidField { .. }
            | ApiError::Translation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message reported to the caller.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), TranslationResponse::failed(self.message())).into_response()
    }
}

/// Empty 200 answering a CORS preflight.
pub fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
        ],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let body = TranslationResponse::translated(
            TranslationRequest {
                text: "hello".into(),
                source_lang: "english".into(),
                target_lang: "fr".into(),
            },
            "bonjour".into(),
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": true,
                "original": {"text": "hello", "source_lang": "english", "target_lang": "fr"},
                "translation": "bonjour"
            })
        );
    }

    #[test]
    fn test_failure_envelope_omits_absent_fields() {
        let body = TranslationResponse::failed("Unauthorized");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"success": false, "error": "Unauthorized"})
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::MissingText.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingTargetLang.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            ApiError::InvalidField { field: "text", found: "number" }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Translation(TranslatorError::MissingTranslation).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_upstream_message_becomes_unknown_error() {
        let err = ApiError::Translation(TranslatorError::Upstream {
            status: 500,
            message: String::new(),
        });
        assert_eq!(err.message(), "Unknown error");
    }

    #[test]
    fn test_upstream_message_passes_through() {
        let err = ApiError::Translation(TranslatorError::Upstream {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_invalid_field_message() {
        let err = ApiError::InvalidField { field: "target_lang", found: "array" };
        assert_eq!(err.message(), "target_lang must be a string, got array");
    }

    #[test]
    fn test_preflight_headers() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, X-API-Key");
    }
}
