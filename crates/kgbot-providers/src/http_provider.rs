//! HTTP completion providers — OpenAI `/v1/completions` and Together `/inference`.
//!
//! Both follow the same pipeline: transcribe the request, build a prompt,
//! POST it with a bearer key, and normalize the reply. They differ in the
//! request body and in the reply shape, captured by [`CompletionApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use kgbot_core::config::KnowledgeConfig;
use kgbot_core::error::KnowledgeError;
use kgbot_core::types::{ProviderKind, SpeechRequest};
use kgbot_core::utils::truncate_string;

use crate::prompt::build_prompt;
use crate::registry::{ProviderSpec, OPENAI, TOGETHER};
use crate::replies::{normalize_openai, normalize_together};
use crate::traits::AnswerProvider;
use crate::transcription::TranscriptionProvider;

/// Model used against the OpenAI completions endpoint.
pub const OPENAI_MODEL: &str = "text-davinci-003";

// ─────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────

/// Body of `POST /v1/completions`.
#[derive(Clone, Debug, Serialize)]
pub struct OpenAiCompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

/// Body of `POST /inference`.
#[derive(Clone, Debug, Serialize)]
pub struct TogetherInferenceRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum CompletionBody {
    OpenAi(OpenAiCompletionRequest),
    Together(TogetherInferenceRequest),
}

// ─────────────────────────────────────────────
// CompletionApi
// ─────────────────────────────────────────────

/// Which completion API an [`HttpProvider`] speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionApi {
    OpenAi,
    Together,
}

impl CompletionApi {
    /// The completion API for a configured provider, if it is one.
    pub fn from_kind(kind: ProviderKind) -> Option<Self> {
        match kind {
            ProviderKind::OpenAi => Some(CompletionApi::OpenAi),
            ProviderKind::Together => Some(CompletionApi::Together),
            ProviderKind::Houndify | ProviderKind::None => None,
        }
    }

    /// Registry spec for this API.
    pub fn spec(&self) -> &'static ProviderSpec {
        match self {
            CompletionApi::OpenAi => &OPENAI,
            CompletionApi::Together => &TOGETHER,
        }
    }

    /// Build the request body for a prompt.
    ///
    /// OpenAI always runs [`OPENAI_MODEL`]; Together runs the configured model.
    pub fn body(&self, model: &str, prompt: String) -> CompletionBody {
        match self {
            CompletionApi::OpenAi => CompletionBody::OpenAi(OpenAiCompletionRequest {
                model: OPENAI_MODEL.to_string(),
                prompt,
                temperature: 0.7,
                max_tokens: 256,
                top_p: 1.0,
                frequency_penalty: 0.2,
                presence_penalty: 0.0,
            }),
            CompletionApi::Together => CompletionBody::Together(TogetherInferenceRequest {
                model: model.to_string(),
                prompt,
                temperature: 0.7,
                max_tokens: 200,
                top_p: 1.0,
            }),
        }
    }

    /// Reduce a raw reply body to the answer text.
    pub fn normalize(&self, body: &[u8]) -> Result<String, KnowledgeError> {
        match self {
            CompletionApi::OpenAi => normalize_openai(body),
            CompletionApi::Together => normalize_together(body),
        }
    }
}

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A knowledge graph driver backed by an LLM completion API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    api: CompletionApi,
    /// API base URL (e.g. `"https://api.together.xyz"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Model for APIs that take one from config.
    model: String,
    /// Name the assistant answers to in question prompts.
    assistant_name: String,
    timeout: Option<Duration>,
    transcriber: Arc<dyn TranscriptionProvider>,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("provider", &self.api.spec().display_name)
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("transcriber", &self.transcriber.display_name())
            .finish()
    }
}

impl HttpProvider {
    /// Create a provider from the knowledge config.
    ///
    /// `config.api_base` overrides the registry default.
    pub fn new(
        api: CompletionApi,
        config: &KnowledgeConfig,
        transcriber: Arc<dyn TranscriptionProvider>,
    ) -> Self {
        let spec = api.spec();
        let api_base = config
            .api_base
            .clone()
            .or_else(|| spec.default_api_base.map(String::from))
            .unwrap_or_default();

        HttpProvider {
            client: reqwest::Client::new(),
            api,
            api_base,
            api_key: config.key.clone(),
            model: config.model.clone(),
            assistant_name: config.robot_name.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            transcriber,
        }
    }

    /// Full endpoint URL.
    fn endpoint_url(&self) -> String {
        self.api.spec().endpoint_url(&self.api_base)
    }

    /// Build the prompt, call the API, and normalize the reply.
    pub async fn complete(&self, transcript: &str) -> Result<String, KnowledgeError> {
        let spec = self.api.spec();
        let prompt = build_prompt(transcript, &self.assistant_name);
        let body = self.api.body(&self.model, prompt);

        debug!(
            provider = spec.display_name,
            model = %self.model,
            body = ?body,
            "Making completion request"
        );

        let mut request = self
            .client
            .post(self.endpoint_url())
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(provider = spec.display_name, error = %e, "HTTP request failed");
                return Err(KnowledgeError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = spec.display_name,
                status = %status,
                body = %error_text,
                "API error"
            );
            return Err(KnowledgeError::MalformedReply(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| KnowledgeError::MalformedReply(e.to_string()))?;

        self.api.normalize(&bytes)
    }
}

#[async_trait]
impl AnswerProvider for HttpProvider {
    async fn answer(&self, request: &SpeechRequest) -> String {
        let spec = self.api.spec();

        let transcript = match self.transcriber.transcribe(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    provider = spec.display_name,
                    transcriber = self.transcriber.display_name(),
                    error = %e,
                    "Transcription failed, skipping request"
                );
                return KnowledgeError::Transcription(e.to_string()).spoken(&spec.fallbacks);
            }
        };

        info!(
            provider = spec.display_name,
            bot = request.bot_num,
            transcript = %transcript,
            "Sending request to {}...",
            spec.display_name
        );

        match self.complete(&transcript).await {
            Ok(answer) => {
                debug!(
                    provider = spec.display_name,
                    answer = %truncate_string(&answer, 80),
                    "{} response",
                    spec.display_name
                );
                answer
            }
            Err(e) => {
                warn!(provider = spec.display_name, error = %e, "No usable answer");
                e.spoken(&spec.fallbacks)
            }
        }
    }

    fn display_name(&self) -> &str {
        self.api.spec().display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
