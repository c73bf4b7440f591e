//! Core types for kgbot — providers, speech requests, and the wire shapes
//! exchanged with the device over the knowledge graph stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// The knowledge graph backend selected in config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Houndify,
    #[serde(rename = "openai")]
    OpenAi,
    Together,
    None,
}

impl ProviderKind {
    /// Parse a config value. Unknown and empty names map to `None`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "houndify" => ProviderKind::Houndify,
            "openai" => ProviderKind::OpenAi,
            "together" => ProviderKind::Together,
            _ => ProviderKind::None,
        }
    }

    /// Config name of this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Houndify => "houndify",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Together => "together",
            ProviderKind::None => "none",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Speech requests
// ─────────────────────────────────────────────

/// Encoding of the captured utterance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioEncoding {
    /// A complete WAV file.
    Wav,
    /// Ogg-contained Opus frames.
    OggOpus,
    /// Headerless mono signed 16-bit little-endian PCM.
    Pcm16 { sample_rate: u32 },
}

impl AudioEncoding {
    /// File name hint for upload endpoints that sniff by extension.
    pub fn file_name(&self) -> &'static str {
        match self {
            AudioEncoding::Wav | AudioEncoding::Pcm16 { .. } => "speech.wav",
            AudioEncoding::OggOpus => "speech.ogg",
        }
    }
}

/// What the device sent for this query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechPayload {
    /// Raw captured audio.
    Audio { data: Vec<u8>, encoding: AudioEncoding },
    /// Already transcribed on the device or by an upstream service.
    Text(String),
}

/// One in-progress spoken query.
///
/// Created by the request handler and read-only to the dispatcher and providers.
#[derive(Clone, Debug)]
pub struct SpeechRequest {
    pub session: String,
    pub device: String,
    /// In-flight request number at the time this request arrived. Logging only.
    pub bot_num: usize,
    pub payload: SpeechPayload,
    pub received_at: DateTime<Utc>,
}

impl SpeechRequest {
    pub fn new(
        session: impl Into<String>,
        device: impl Into<String>,
        payload: SpeechPayload,
    ) -> Self {
        SpeechRequest {
            session: session.into(),
            device: device.into(),
            bot_num: 0,
            payload,
            received_at: Utc::now(),
        }
    }

    /// Shorthand for a request whose payload is already text.
    pub fn text(
        session: impl Into<String>,
        device: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(session, device, SpeechPayload::Text(text.into()))
    }

    /// Milliseconds since the request was received.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.received_at).num_milliseconds()
    }
}

// ─────────────────────────────────────────────
// Knowledge graph stream messages
// ─────────────────────────────────────────────

/// Command type of every knowledge graph response.
pub const NO_RESULT_COMMAND: &str = "NoResultCommand";

/// An inbound knowledge graph query from a device.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGraphRequest {
    pub session: String,
    pub device: String,
    pub payload: SpeechPayload,
}

impl From<KnowledgeGraphRequest> for SpeechRequest {
    fn from(req: KnowledgeGraphRequest) -> Self {
        SpeechRequest::new(req.session, req.device, req.payload)
    }
}

/// The single message sent back over the stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGraphResponse {
    pub session: String,
    pub device_id: String,
    pub command_type: String,
    pub spoken_text: String,
}

impl KnowledgeGraphResponse {
    /// Build the answer message for a request.
    pub fn answer(request: &SpeechRequest, spoken_text: impl Into<String>) -> Self {
        KnowledgeGraphResponse {
            session: request.session.clone(),
            device_id: request.device.clone(),
            command_type: NO_RESULT_COMMAND.to_string(),
            spoken_text: spoken_text.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
