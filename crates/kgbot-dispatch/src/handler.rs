//! Knowledge graph request handler.
//!
//! One request in, one `NoResultCommand` response out, whatever the provider
//! did. Only a failure to deliver the response is reported to the caller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

use kgbot_core::types::{KnowledgeGraphRequest, KnowledgeGraphResponse, SpeechRequest};

use crate::dispatcher::Dispatcher;

/// Where responses go: the device stream, stdout, a test recorder.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    async fn send(&self, response: &KnowledgeGraphResponse) -> anyhow::Result<()>;
}

pub struct KnowledgeGraphHandler {
    dispatcher: Arc<Dispatcher>,
    in_flight: AtomicUsize,
}

impl KnowledgeGraphHandler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        KnowledgeGraphHandler {
            dispatcher,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Requests currently being answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Answer a request and send the response through `sink`.
    pub async fn handle(
        &self,
        request: KnowledgeGraphRequest,
        sink: &dyn ResponseSink,
    ) -> anyhow::Result<()> {
        let bot_num = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

        let mut speech: SpeechRequest = request.into();
        speech.bot_num = bot_num;

        info!(
            bot = bot_num,
            session = %speech.session,
            device = %speech.device,
            "Knowledge graph request"
        );

        let spoken = self.dispatcher.dispatch(&speech).await;
        let response = KnowledgeGraphResponse::answer(&speech, spoken);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        info!(
            bot = bot_num,
            elapsed_ms = speech.elapsed_ms(),
            "Knowledge graph request served"
        );

        sink.send(&response)
            .await
            .with_context(|| format!("sending knowledge graph response for session {}", speech.session))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    use kgbot_core::config::Config;
    use kgbot_core::error::DISABLED_MESSAGE;
    use kgbot_core::types::SpeechPayload;
    use kgbot_providers::TextTranscriber;

    use crate::dispatcher::DispatchDeps;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<KnowledgeGraphResponse>>,
    }

    #[async_trait]
    impl ResponseSink for RecordingSink {
        async fn send(&self, response: &KnowledgeGraphResponse) -> anyhow::Result<()> {
            self.sent.lock().await.push(response.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl ResponseSink for BrokenSink {
        async fn send(&self, _response: &KnowledgeGraphResponse) -> anyhow::Result<()> {
            anyhow::bail!("stream closed")
        }
    }

    fn disabled_handler() -> KnowledgeGraphHandler {
        let dispatcher =
            Dispatcher::from_config(&Config::default(), DispatchDeps::new(Arc::new(TextTranscriber)));
        KnowledgeGraphHandler::new(Arc::new(dispatcher))
    }

    fn kg_request(session: &str) -> KnowledgeGraphRequest {
        KnowledgeGraphRequest {
            session: session.into(),
            device: "vic:00e20100".into(),
            payload: SpeechPayload::Text("how tall is mount everest".into()),
        }
    }

    #[tokio::test]
    async fn test_sends_no_result_command() {
        let handler = disabled_handler();
        let sink = RecordingSink::default();

        handler.handle(kg_request("sess-1"), &sink).await.unwrap();

        let sent = sink.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].session, "sess-1");
        assert_eq!(sent[0].device_id, "vic:00e20100");
        assert_eq!(sent[0].command_type, "NoResultCommand");
        assert_eq!(sent[0].spoken_text, DISABLED_MESSAGE);
    }

    #[tokio::test]
    async fn test_counter_returns_to_zero() {
        let handler = disabled_handler();
        let sink = RecordingSink::default();

        for i in 0..3 {
            handler.handle(kg_request(&format!("s{i}")), &sink).await.unwrap();
        }
        assert_eq!(handler.in_flight(), 0);
        assert_eq!(sink.sent.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let handler = disabled_handler();
        let err = handler.handle(kg_request("sess-9"), &BrokenSink).await.unwrap_err();

        assert!(err.to_string().contains("sess-9"));
        assert_eq!(handler.in_flight(), 0);
    }
}
