//! Speech-to-text in front of the completion providers.
//!
//! `WhisperTranscriber` talks to any OpenAI-compatible
//! `/v1/audio/transcriptions` endpoint. `TextTranscriber` passes through
//! requests that arrive already transcribed.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use tracing::{debug, error};

use kgbot_core::config::TranscriptionConfig;
use kgbot_core::types::{AudioEncoding, SpeechPayload, SpeechRequest};

// ─────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────

/// Trait for speech-to-text transcription providers.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Transcribe the utterance carried by a speech request.
    async fn transcribe(&self, request: &SpeechRequest) -> anyhow::Result<String>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

// ─────────────────────────────────────────────
// Whisper (OpenAI-compatible)
// ─────────────────────────────────────────────

/// Whisper transcription over HTTP.
///
/// Text payloads are returned untouched; audio is uploaded as a multipart
/// `file`, with raw PCM wrapped in a WAV container first.
pub struct WhisperTranscriber {
    api_key: String,
    api_url: String,
    model: String,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    pub fn new(api_key: &str, api_url: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_url: api_url.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &TranscriptionConfig) -> Self {
        Self::new(&config.api_key, &config.api_url, &config.model)
    }

    /// Check if the transcriber is configured (has an API key).
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl TranscriptionProvider for WhisperTranscriber {
    async fn transcribe(&self, request: &SpeechRequest) -> anyhow::Result<String> {
        let (data, encoding) = match &request.payload {
            SpeechPayload::Text(text) => return Ok(text.clone()),
            SpeechPayload::Audio { data, encoding } => (data, *encoding),
        };

        if !self.is_configured() {
            bail!("whisper transcription: no API key configured");
        }

        let file_bytes = match encoding {
            AudioEncoding::Pcm16 { sample_rate } => pcm16_to_wav(data, sample_rate)?,
            AudioEncoding::Wav | AudioEncoding::OggOpus => data.clone(),
        };

        debug!(
            device = %request.device,
            bytes = file_bytes.len(),
            model = %self.model,
            "transcribing audio via Whisper"
        );

        let file_part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(encoding.file_name())
            .mime_str("application/octet-stream")?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .timeout(Duration::from_secs(60))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %body,
                "whisper transcription API error"
            );
            return Err(anyhow!("transcription API returned {}: {}", status, body));
        }

        let json: serde_json::Value = response.json().await?;
        let text = json["text"]
            .as_str()
            .ok_or_else(|| anyhow!("transcription reply has no text"))?
            .trim()
            .to_string();

        debug!(chars = text.len(), "transcription complete");

        Ok(text)
    }

    fn display_name(&self) -> &str {
        "Whisper"
    }
}

// ─────────────────────────────────────────────
// Pass-through
// ─────────────────────────────────────────────

/// Accepts only pre-transcribed requests. Audio is an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextTranscriber;

#[async_trait]
impl TranscriptionProvider for TextTranscriber {
    async fn transcribe(&self, request: &SpeechRequest) -> anyhow::Result<String> {
        match &request.payload {
            SpeechPayload::Text(text) => Ok(text.clone()),
            SpeechPayload::Audio { .. } => bail!("no speech-to-text backend configured"),
        }
    }

    fn display_name(&self) -> &str {
        "Text"
    }
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

/// Wrap mono 16-bit little-endian PCM in a WAV container.
pub fn pcm16_to_wav(data: &[u8], sample_rate: u32) -> anyhow::Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for pair in data.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([pair[0], pair[1]]))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Guess the audio encoding of a file from its extension.
///
/// `.pcm` / `.raw` are assumed to be 16 kHz mono PCM16, the rate the robot
/// captures at.
pub fn encoding_for_path(path: &Path) -> Option<AudioEncoding> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "wav" => Some(AudioEncoding::Wav),
        "ogg" | "oga" | "opus" => Some(AudioEncoding::OggOpus),
        "pcm" | "raw" => Some(AudioEncoding::Pcm16 { sample_rate: 16000 }),
        _ => None,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
