//! Configuration schema.
//!
//! Hierarchy: `Config` → `KnowledgeConfig`, `TranscriptionConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::types::ProviderKind;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.kgbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
}

// ─────────────────────────────────────────────
// Knowledge graph
// ─────────────────────────────────────────────

/// Knowledge graph provider settings.
///
/// Read-only snapshot for the dispatcher. `provider` stays a free string on
/// disk; [`KnowledgeConfig::provider_kind`] maps anything unrecognized to
/// [`ProviderKind::None`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeConfig {
    /// Master switch.
    pub enable: bool,
    /// `"houndify"`, `"openai"` or `"together"`.
    pub provider: String,
    /// Credential ID (Houndify client ID).
    pub id: String,
    /// Credential key (Houndify client key, or bearer token for the LLM APIs).
    pub key: String,
    /// Model name, used by Together.
    pub model: String,
    /// Assistant name used to personalize prompts.
    pub robot_name: String,
    /// Override for the LLM endpoint base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Per-request timeout. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            enable: false,
            provider: String::new(),
            id: String::new(),
            key: String::new(),
            model: String::new(),
            robot_name: "Vector".to_string(),
            api_base: None,
            timeout_secs: None,
        }
    }
}

impl KnowledgeConfig {
    /// The configured provider, parsed.
    pub fn provider_kind(&self) -> ProviderKind {
        ProviderKind::from_name(&self.provider)
    }

    /// Whether both credential fields are filled in.
    pub fn has_credentials(&self) -> bool {
        !self.id.is_empty() && !self.key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Transcription
// ─────────────────────────────────────────────

/// Speech-to-text settings for the Whisper-compatible HTTP transcriber.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptionConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://api.openai.com/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
        }
    }
}

impl TranscriptionConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.knowledge.enable);
        assert_eq!(config.knowledge.robot_name, "Vector");
        assert_eq!(config.knowledge.provider_kind(), ProviderKind::None);
        assert_eq!(config.transcription.model, "whisper-1");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "knowledge": {
                "enable": true,
                "provider": "together",
                "key": "tok",
                "model": "togethercomputer/llama-2-70b-chat",
                "robotName": "Wall-E",
                "timeoutSecs": 30
            }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.knowledge.enable);
        assert_eq!(config.knowledge.provider_kind(), ProviderKind::Together);
        assert_eq!(config.knowledge.robot_name, "Wall-E");
        assert_eq!(config.knowledge.timeout_secs, Some(30));
        // Section missing from JSON keeps defaults
        assert!(!config.transcription.is_configured());
    }

    #[test]
    fn test_unknown_provider_is_none() {
        let knowledge = KnowledgeConfig {
            enable: true,
            provider: "bing".into(),
            ..Default::default()
        };
        assert_eq!(knowledge.provider_kind(), ProviderKind::None);
    }

    #[test]
    fn test_has_credentials() {
        let mut knowledge = KnowledgeConfig::default();
        assert!(!knowledge.has_credentials());
        knowledge.id = "id".into();
        assert!(!knowledge.has_credentials());
        knowledge.key = "key".into();
        assert!(knowledge.has_credentials());
    }

    #[test]
    fn test_serialize_skips_unset_options() {
        let raw = serde_json::to_value(Config::default()).unwrap();
        assert!(raw["knowledge"].get("apiBase").is_none());
        assert!(raw["knowledge"].get("robotName").is_some());
    }
}
