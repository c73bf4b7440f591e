//! Knowledge graph failures and the spoken text each one turns into.
//!
//! Every failure is recovered before it leaves the dispatcher: the device
//! always gets a sentence to speak.

use thiserror::Error;

/// Answer when the knowledge graph is disabled or the provider is unknown.
pub const DISABLED_MESSAGE: &str =
    "Knowledge graph is not enabled. This can be enabled in the web interface.";

/// Answer when speech-to-text fails.
pub const TRANSCRIPTION_FAILED_MESSAGE: &str = "There was an error.";

/// Provider-specific sentences for failures that carry no usable text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpokenFallbacks {
    /// The provider could not be reached.
    pub transport: &'static str,
    /// The provider answered with something we could not read.
    pub no_response: &'static str,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KnowledgeError {
    /// Switched off, unknown provider, or provider force-disabled at startup.
    #[error("{message}", message = DISABLED_MESSAGE)]
    Disabled,

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed reply: {0}")]
    MalformedReply(String),

    /// Failure reported by the backend itself. The message is spoken as-is.
    #[error("{0}")]
    Backend(String),
}

impl KnowledgeError {
    /// The sentence to speak for this failure.
    pub fn spoken(&self, fallbacks: &SpokenFallbacks) -> String {
        match self {
            KnowledgeError::Disabled => self.to_string(),
            KnowledgeError::Transcription(_) => TRANSCRIPTION_FAILED_MESSAGE.to_string(),
            KnowledgeError::Transport(_) => fallbacks.transport.to_string(),
            KnowledgeError::MalformedReply(_) => fallbacks.no_response.to_string(),
            KnowledgeError::Backend(msg) if msg.trim().is_empty() => {
                fallbacks.no_response.to_string()
            }
            KnowledgeError::Backend(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for KnowledgeError {
    fn from(err: serde_json::Error) -> Self {
        KnowledgeError::MalformedReply(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACKS: SpokenFallbacks = SpokenFallbacks {
        transport: "could not reach it",
        no_response: "it said nothing",
    };

    #[test]
    fn test_spoken_disabled() {
        assert_eq!(KnowledgeError::Disabled.spoken(&FALLBACKS), DISABLED_MESSAGE);
        assert_eq!(KnowledgeError::Disabled.to_string(), DISABLED_MESSAGE);
    }

    #[test]
    fn test_spoken_transcription() {
        let err = KnowledgeError::Transcription("stt down".into());
        assert_eq!(err.spoken(&FALLBACKS), "There was an error.");
    }

    #[test]
    fn test_spoken_transport_and_malformed() {
        assert_eq!(
            KnowledgeError::Transport("refused".into()).spoken(&FALLBACKS),
            "could not reach it"
        );
        assert_eq!(
            KnowledgeError::MalformedReply("eof".into()).spoken(&FALLBACKS),
            "it said nothing"
        );
    }

    #[test]
    fn test_spoken_backend_passes_message() {
        let err = KnowledgeError::Backend("Invalid client key".into());
        assert_eq!(err.spoken(&FALLBACKS), "Invalid client key");
        assert_eq!(err.to_string(), "Invalid client key");
    }

    #[test]
    fn test_spoken_backend_empty_message_falls_back() {
        let err = KnowledgeError::Backend("  ".into());
        assert_eq!(err.spoken(&FALLBACKS), "it said nothing");
    }

    #[test]
    fn test_from_serde_error() {
        let err: KnowledgeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, KnowledgeError::MalformedReply(_)));
    }
}
