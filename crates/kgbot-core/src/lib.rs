//! kgbot core — configuration, request/response types, errors, and text helpers
//! shared by the provider and dispatch crates.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use error::KnowledgeError;
pub use types::{
    AudioEncoding, KnowledgeGraphRequest, KnowledgeGraphResponse, ProviderKind, SpeechPayload,
    SpeechRequest,
};
