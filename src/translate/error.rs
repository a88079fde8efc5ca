use std::time::Duration;

/// Failures talking to the upstream translation model.
#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    /// Transport failure (DNS, connect, TLS, body read).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an error, either through a non-2xx status
    /// or a `success: false` envelope. `message` is the provider's text.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The provider reported success but sent no translated text.
    #[error("upstream response did not include translated_text")]
    MissingTranslation,

    /// The provider's body was not the envelope we expect.
    #[error("invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
}

impl TranslatorError {
    /// Label used for the upstream outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslatorError::Http(_) => "http_error",
            TranslatorError::Upstream { .. } => "upstream_error",
            TranslatorError::MissingTranslation => "missing_translation",
            TranslatorError::Decode(_) => "decode_error",
            TranslatorError::Timeout(_) => "timeout",
        }
    }
}
