//! Houndify conversational search.
//!
//! Audio is streamed to Houndify by an SDK client that the host process
//! supplies through [`HoundifyConnector`]. The provider builds that client
//! once, on first use, behind a `OnceCell`, so concurrent requests share a
//! single client and its conversation state.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use kgbot_core::config::KnowledgeConfig;
use kgbot_core::error::KnowledgeError;
use kgbot_core::types::SpeechRequest;
use kgbot_core::utils::truncate_string;

use crate::registry::HOUNDIFY;
use crate::replies::normalize_houndify;
use crate::traits::AnswerProvider;

// ─────────────────────────────────────────────
// SDK seam
// ─────────────────────────────────────────────

/// A connected Houndify client.
#[async_trait]
pub trait HoundifyClient: Send + Sync {
    /// Stream the request's audio and return the raw JSON reply.
    async fn stream_audio(&self, request: &SpeechRequest) -> anyhow::Result<String>;
}

/// Builds a [`HoundifyClient`] from credentials.
pub trait HoundifyConnector: Send + Sync {
    fn connect(&self, credentials: &HoundifyCredentials) -> anyhow::Result<Arc<dyn HoundifyClient>>;
}

/// Client ID/key pair plus client options.
#[derive(Clone)]
pub struct HoundifyCredentials {
    pub client_id: String,
    pub client_key: String,
    /// Keep conversation state between queries.
    pub conversation_state: bool,
}

impl std::fmt::Debug for HoundifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoundifyCredentials")
            .field("client_id", &self.client_id)
            .field("client_key", &"<redacted>")
            .field("conversation_state", &self.conversation_state)
            .finish()
    }
}

// ─────────────────────────────────────────────
// HoundifyProvider
// ─────────────────────────────────────────────

pub struct HoundifyProvider {
    credentials: HoundifyCredentials,
    connector: Arc<dyn HoundifyConnector>,
    client: OnceCell<Arc<dyn HoundifyClient>>,
}

impl HoundifyProvider {
    /// Create the provider from config.
    ///
    /// Returns `None` when the client ID or key is empty; Houndify is then
    /// treated as disabled.
    pub fn new(config: &KnowledgeConfig, connector: Arc<dyn HoundifyConnector>) -> Option<Self> {
        if !config.has_credentials() {
            warn!("Houndify Client Key or ID was empty, not initializing kg client");
            return None;
        }

        Some(HoundifyProvider {
            credentials: HoundifyCredentials {
                client_id: config.id.clone(),
                client_key: config.key.clone(),
                conversation_state: true,
            },
            connector,
            client: OnceCell::new(),
        })
    }

    /// The shared client, connecting on first call. A failed connect is
    /// retried on the next request.
    async fn client(&self) -> Result<&Arc<dyn HoundifyClient>, KnowledgeError> {
        self.client
            .get_or_try_init(|| async {
                let client = self
                    .connector
                    .connect(&self.credentials)
                    .map_err(|e| KnowledgeError::Transport(e.to_string()))?;
                info!("Initialized Houndify client");
                Ok::<_, KnowledgeError>(client)
            })
            .await
    }

    /// Stream the request and normalize Houndify's reply.
    pub async fn query(&self, request: &SpeechRequest) -> Result<String, KnowledgeError> {
        let client = self.client().await?;
        let raw = client
            .stream_audio(request)
            .await
            .map_err(|e| KnowledgeError::Transport(e.to_string()))?;
        normalize_houndify(raw.as_bytes())
    }
}

#[async_trait]
impl AnswerProvider for HoundifyProvider {
    async fn answer(&self, request: &SpeechRequest) -> String {
        info!(bot = request.bot_num, "Sending request to Houndify...");

        match self.query(request).await {
            Ok(answer) => {
                debug!(answer = %truncate_string(&answer, 80), "Houndify response");
                answer
            }
            Err(e) => {
                warn!(error = %e, "Houndify gave no answer");
                e.spoken(&HOUNDIFY.fallbacks)
            }
        }
    }

    fn display_name(&self) -> &str {
        HOUNDIFY.display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
