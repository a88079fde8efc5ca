//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the caller API key.
pub const API_KEY_ENV_VAR: &str = "VALID_API_KEY";
/// Environment variable holding the inference account id.
pub const ACCOUNT_ID_ENV_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";
/// Environment variable holding the inference API token.
pub const API_TOKEN_ENV_VAR: &str = "CLOUDFLARE_API_TOKEN";
/// Environment variable overriding the listener bind address.
pub const BIND_ENV_VAR: &str = "TRANSLATE_GATEWAY_BIND";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using the given lookup.
///
/// Empty values are ignored so an exported-but-blank variable does not wipe
/// a value set in the file.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(key) = get(API_KEY_ENV_VAR) {
        config.auth.api_key = key;
    }
    if let Some(account_id) = get(ACCOUNT_ID_ENV_VAR) {
        config.translator.account_id = account_id;
    }
    if let Some(token) = get(API_TOKEN_ENV_VAR) {
        config.translator.api_token = token;
    }
    if let Some(bind) = get(BIND_ENV_VAR) {
        config.listener.bind_address = bind;
    }
}

/// Load configuration from an optional TOML file plus the process
/// environment, then validate it.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            parse_config(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
