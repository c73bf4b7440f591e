//! `kgbot ask` — run one knowledge graph request through the handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use kgbot_core::config::{load_config, Config};
use kgbot_core::types::{KnowledgeGraphRequest, KnowledgeGraphResponse, SpeechPayload};
use kgbot_dispatch::{DispatchDeps, Dispatcher, KnowledgeGraphHandler, ResponseSink};
use kgbot_providers::transcription::encoding_for_path;
use kgbot_providers::{TextTranscriber, TranscriptionProvider, WhisperTranscriber};

use crate::helpers;

/// What the user asked with.
pub enum Input {
    Text(String),
    Audio(PathBuf),
}

/// Run the ask command.
pub async fn run(
    config_path: Option<&Path>,
    input: Input,
    session: String,
    device: String,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path);
    let request = build_request(input, session, device)?;

    let dispatcher = Dispatcher::from_config(&config, build_deps(&config));
    info!(
        provider = %dispatcher.provider_kind(),
        enabled = dispatcher.is_enabled(),
        "dispatcher ready"
    );

    let handler = KnowledgeGraphHandler::new(Arc::new(dispatcher));
    handler.handle(request, &StdoutSink { json }).await
}

/// Speech-to-text for this config. Whisper when a key is set.
fn build_deps(config: &Config) -> DispatchDeps {
    let transcriber: Arc<dyn TranscriptionProvider> = if config.transcription.is_configured() {
        Arc::new(WhisperTranscriber::from_config(&config.transcription))
    } else {
        Arc::new(TextTranscriber)
    };
    DispatchDeps::new(transcriber)
}

/// Build the knowledge graph request from CLI input.
pub fn build_request(input: Input, session: String, device: String) -> Result<KnowledgeGraphRequest> {
    let payload = match input {
        Input::Text(text) => SpeechPayload::Text(text),
        Input::Audio(path) => {
            let encoding = encoding_for_path(&path).with_context(|| {
                format!(
                    "unsupported audio file {} (expected .wav, .ogg, .opus or .pcm)",
                    path.display()
                )
            })?;
            let data = std::fs::read(&path)
                .with_context(|| format!("failed to read audio file: {}", path.display()))?;
            SpeechPayload::Audio { data, encoding }
        }
    };

    Ok(KnowledgeGraphRequest {
        session,
        device,
        payload,
    })
}

/// Prints responses to stdout.
struct StdoutSink {
    json: bool,
}

#[async_trait]
impl ResponseSink for StdoutSink {
    async fn send(&self, response: &KnowledgeGraphResponse) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(response)?);
        } else {
            helpers::print_response(&response.spoken_text);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
