//! Knowledge graph providers for kgbot.
//!
//! # Architecture
//!
//! - [`traits::AnswerProvider`] — one spoken answer per speech request
//! - [`registry`] — static specs for the supported backends
//! - [`http_provider::HttpProvider`] — OpenAI and Together completion drivers
//! - [`houndify::HoundifyProvider`] — conversational search over the Houndify SDK client
//! - [`replies`] — typed reply shapes and their normalizers
//! - [`prompt`] — prompt templates for the completion APIs
//! - [`transcription`] — speech-to-text in front of the completion drivers

pub mod houndify;
pub mod http_provider;
pub mod prompt;
pub mod registry;
pub mod replies;
pub mod traits;
pub mod transcription;

// Re-export main types for convenience
pub use houndify::{HoundifyClient, HoundifyConnector, HoundifyCredentials, HoundifyProvider};
pub use http_provider::{CompletionApi, HttpProvider};
pub use registry::{ProviderSpec, PROVIDERS};
pub use traits::AnswerProvider;
pub use transcription::{TextTranscriber, TranscriptionProvider, WhisperTranscriber};
