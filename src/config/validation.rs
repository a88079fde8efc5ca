//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Require the secrets the gateway cannot run without
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("auth.api_key must be set (or VALID_API_KEY exported)")]
    MissingApiKey,
    #[error("translator.account_id must be set")]
    MissingAccountId,
    #[error("translator.api_token must be set")]
    MissingApiToken,
    #[error("translator.model must not be empty")]
    MissingModel,
    #[error("invalid address for {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("invalid translator.base_url {value}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("translator.timeout_secs ({upstream}) must be below timeouts.request_secs ({request})")]
    UpstreamTimeoutTooLong { upstream: u64, request: u64 },
    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.auth.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    let translator = &config.translator;
    if translator.account_id.is_empty() {
        errors.push(ValidationError::MissingAccountId);
    }
    if translator.api_token.is_empty() {
        errors.push(ValidationError::MissingApiToken);
    }
    if translator.model.is_empty() {
        errors.push(ValidationError::MissingModel);
    }
    match url::Url::parse(&translator.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidBaseUrl {
            value: translator.base_url.clone(),
            reason: format!("unsupported scheme {}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            value: translator.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    if translator.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("translator.timeout_secs"));
    }
    if config.timeouts.request_secs > 0
        && translator.timeout_secs >= config.timeouts.request_secs
    {
        errors.push(ValidationError::UpstreamTimeoutTooLong {
            upstream: translator.timeout_secs,
            request: config.timeouts.request_secs,
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
