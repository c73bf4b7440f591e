//! Answer provider trait — the capability every knowledge graph backend offers.
//!
//! The dispatcher picks one implementation from config and calls it for each
//! request. Implementations own their whole pipeline (speech-to-text when
//! needed, the backend call, reply normalization) and never fail: errors are
//! turned into a sentence for the device to speak.

use async_trait::async_trait;
use kgbot_core::types::SpeechRequest;

/// A backend that turns a spoken question into a spoken answer.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Answer one request.
    ///
    /// Always returns non-empty text. On failure this is the provider's
    /// fallback sentence, or the backend's own error message when it sent one.
    async fn answer(&self, request: &SpeechRequest) -> String;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
