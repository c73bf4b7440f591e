//! Provider dispatch.
//!
//! The provider is chosen once from config. Anything that keeps it from
//! answering (switch off, unknown name, missing Houndify credentials or SDK)
//! leaves the dispatcher without a provider, and every request then gets the
//! disabled message.

use std::sync::Arc;

use tracing::{debug, info, warn};

use kgbot_core::config::Config;
use kgbot_core::error::KnowledgeError;
use kgbot_core::types::{ProviderKind, SpeechRequest};
use kgbot_core::utils::truncate_string;
use kgbot_providers::{
    AnswerProvider, CompletionApi, HoundifyConnector, HoundifyProvider, HttpProvider,
    TranscriptionProvider,
};

/// Collaborators the dispatcher cannot build from config alone.
#[derive(Clone)]
pub struct DispatchDeps {
    /// Speech-to-text for the completion providers.
    pub transcriber: Arc<dyn TranscriptionProvider>,
    /// Houndify SDK. Without one, Houndify stays disabled.
    pub houndify: Option<Arc<dyn HoundifyConnector>>,
}

impl DispatchDeps {
    pub fn new(transcriber: Arc<dyn TranscriptionProvider>) -> Self {
        DispatchDeps {
            transcriber,
            houndify: None,
        }
    }

    pub fn with_houndify(mut self, connector: Arc<dyn HoundifyConnector>) -> Self {
        self.houndify = Some(connector);
        self
    }
}

pub struct Dispatcher {
    kind: ProviderKind,
    provider: Option<Box<dyn AnswerProvider>>,
}

impl Dispatcher {
    /// Select the provider for this config.
    pub fn from_config(config: &Config, deps: DispatchDeps) -> Self {
        let knowledge = &config.knowledge;
        let kind = knowledge.provider_kind();

        if !knowledge.enable {
            debug!("Knowledge graph disabled in config");
            return Dispatcher { kind, provider: None };
        }

        let provider: Option<Box<dyn AnswerProvider>> = match kind {
            ProviderKind::Houndify => match deps.houndify {
                Some(connector) => HoundifyProvider::new(knowledge, connector)
                    .map(|p| Box::new(p) as Box<dyn AnswerProvider>),
                None => {
                    warn!("Houndify selected but no Houndify client is available");
                    None
                }
            },
            ProviderKind::OpenAi | ProviderKind::Together => CompletionApi::from_kind(kind)
                .map(|api| {
                    Box::new(HttpProvider::new(api, knowledge, deps.transcriber.clone()))
                        as Box<dyn AnswerProvider>
                }),
            ProviderKind::None => {
                warn!(provider = %knowledge.provider, "Unknown knowledge graph provider");
                None
            }
        };

        if let Some(p) = &provider {
            info!(provider = p.display_name(), "Knowledge graph provider ready");
        }

        Dispatcher { kind, provider }
    }

    /// Whether requests reach a provider.
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// The configured provider kind, enabled or not.
    pub fn provider_kind(&self) -> ProviderKind {
        self.kind
    }

    /// Display name of the active provider.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.display_name())
    }

    /// Answer one request. Never fails; errors come back as spoken text.
    pub async fn dispatch(&self, request: &SpeechRequest) -> String {
        let Some(provider) = &self.provider else {
            debug!(session = %request.session, "No knowledge graph provider");
            return KnowledgeError::Disabled.to_string();
        };

        let answer = provider.answer(request).await;
        debug!(
            provider = provider.display_name(),
            session = %request.session,
            bot = request.bot_num,
            elapsed_ms = request.elapsed_ms(),
            answer = %truncate_string(&answer, 80),
            "Dispatch complete"
        );
        answer
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
