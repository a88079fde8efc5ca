//! Translation capability.
//!
//! The gateway never translates anything itself. It hands a normalized
//! [`TranslationRequest`] to a [`Translator`] and waits for the result.
//! [`WorkersAiTranslator`] is the production implementation; tests plug in
//! their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod error;
mod workers_ai;

pub use error::TranslatorError;
pub use workers_ai::WorkersAiTranslator;

/// Language assumed when the caller does not name one.
pub const DEFAULT_SOURCE_LANG: &str = "english";

/// A validated translation request, as echoed back in `original`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Output of a successful upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    pub translated_text: String,
}

/// Anything that can turn a [`TranslationRequest`] into translated text.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Model identifier, used as a metrics label.
    fn model(&self) -> &str;

    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslatorError>;
}
