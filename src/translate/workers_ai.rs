//! Client for the hosted inference REST API.
//!
//! ```text
//! POST {base_url}/accounts/{account_id}/ai/run/{model}
//! Authorization: Bearer {api_token}
//! {"text": "...", "source_lang": "...", "target_lang": "..."}
//!
//! → {"success": true, "result": {"translated_text": "..."}, "errors": []}
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::{Translation, TranslationRequest, Translator, TranslatorError};
use crate::config::TranslatorConfig;

/// [`Translator`] backed by a hosted many-to-many translation model.
pub struct WorkersAiTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
    model: String,
}

impl WorkersAiTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslatorError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("translate-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build on top of an existing client, sharing its connection pool.
    pub fn with_client(client: reqwest::Client, config: &TranslatorConfig) -> Self {
        let endpoint = format!(
            "{}/accounts/{}/ai/run/{}",
            config.base_url.trim_end_matches('/'),
            config.account_id,
            config.model
        );
        Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    translated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

impl Envelope {
    /// Provider's first error message, or empty when it gave none.
    fn first_error(&self) -> String {
        self.errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_default()
    }
}

/// Interpret a provider reply.
fn parse_reply(status: reqwest::StatusCode, body: &[u8]) -> Result<Translation, TranslatorError> {
    let envelope: Envelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => return Err(TranslatorError::Decode(e)),
        Err(_) => {
            return Err(TranslatorError::Upstream {
                status: status.as_u16(),
                message: String::from_utf8_lossy(body).trim().to_string(),
            })
        }
    };

    if !status.is_success() || !envelope.success {
        return Err(TranslatorError::Upstream {
            status: status.as_u16(),
            message: envelope.first_error(),
        });
    }

    envelope
        .result
        .and_then(|r| r.translated_text)
        .map(|translated_text| Translation { translated_text })
        .ok_or(TranslatorError::MissingTranslation)
}

#[async_trait]
impl Translator for WorkersAiTranslator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslatorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            model = %self.model,
            status = status.as_u16(),
            bytes = body.len(),
            "Upstream replied"
        );

        parse_reply(status, &body)
    }
}
