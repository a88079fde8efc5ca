//! The translation endpoint.
//!
//! ```text
//! OPTIONS              → 200 preflight, no auth
//! not POST             → 405
//! bad X-API-Key        → 401
//! body over the limit  → 413
//! body not JSON        → 500 (parser message)
//! text falsy           → 400
//! target_lang falsy    → 400
//! field not a string   → 500
//! upstream error       → 500 (upstream message)
//! otherwise            → 200 {success, original, translation}
//! ```
//!
//! "Falsy" is `null`, `false`, `0`, `""` or absent. A falsy `source_lang`
//! becomes `english`.

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::Deserialize;
use serde_json::Value;

use crate::http::request::RequestIdExt;
use crate::http::response::{preflight, ApiError, TranslationResponse};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::timeouts::with_timeout;
use crate::translate::{TranslationRequest, DEFAULT_SOURCE_LANG};

/// Request body as sent by the caller. Every field may be missing or of
/// any JSON type; `normalize` sorts out the rest.
#[derive(Debug, Default, Deserialize)]
pub struct TranslationPayload {
    pub text: Option<Value>,
    pub source_lang: Option<Value>,
    pub target_lang: Option<Value>,
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !is_falsy(v))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn into_string(field: &'static str, value: Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ApiError::InvalidField {
            field,
            found: json_type(&other),
        }),
    }
}

impl TranslationPayload {
    /// Apply defaults and required-field checks. `text` is checked first,
    /// and presence is checked for every field before any type check.
    pub fn normalize(self) -> Result<TranslationRequest, ApiError> {
        let text = truthy(self.text).ok_or(ApiError::MissingText)?;
        let source_lang = truthy(self.source_lang);
        let target_lang = truthy(self.target_lang).ok_or(ApiError::MissingTargetLang)?;

        Ok(TranslationRequest {
            text: into_string("text", text)?,
            source_lang: match source_lang {
                Some(lang) => into_string("source_lang", lang)?,
                None => DEFAULT_SOURCE_LANG.to_string(),
            },
            target_lang: into_string("target_lang", target_lang)?,
        })
    }
}

/// Single entry point for every method on every path.
pub async fn translate_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method;
    let headers = parts.headers;
    let request_id = headers.request_id().to_string();

    let response = if method == Method::OPTIONS {
        preflight()
    } else if method != Method::POST {
        ApiError::MethodNotAllowed.into_response()
    } else {
        match translate(&state, &headers, body).await {
            Ok(translated) => translated.into_response(),
            Err(e) => {
                let status = e.status_code();
                if status.is_server_error() {
                    tracing::error!(request_id = %request_id, status = status.as_u16(), error = %e, "Translation failed");
                } else {
                    tracing::warn!(request_id = %request_id, status = status.as_u16(), error = %e, "Request rejected");
                }
                e.into_response()
            }
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Buffer the body, failing once it exceeds `limit` bytes.
async fn read_body(body: Body, limit: usize) -> Result<axum::body::Bytes, ApiError> {
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BodyRead(e.to_string())
        }
    })?;
    Ok(collected.to_bytes())
}

async fn translate(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<TranslationResponse, ApiError> {
    if !state.api_key.verify_headers(headers) {
        return Err(ApiError::Unauthorized);
    }

    let body = read_body(body, state.max_body_size).await?;
    let payload: TranslationPayload = serde_json::from_slice(&body)?;
    let request = payload.normalize()?;

    let translator = &state.translator;
    let started = Instant::now();
    let result = with_timeout(state.upstream_timeout, translator.translate(&request)).await;
    metrics::record_upstream(
        translator.model(),
        result.as_ref().map_or_else(|e| e.kind(), |_| "ok"),
        started,
    );
    let translation = result?;

    tracing::info!(
        request_id = %headers.request_id(),
        source_lang = %request.source_lang,
        target_lang = %request.target_lang,
        chars = request.text.chars().count(),
        latency_ms = millis(started.elapsed()),
        "Translated"
    );

    Ok(TranslationResponse::translated(request, translation.translated_text))
}
