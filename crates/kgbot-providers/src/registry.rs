//! Provider registry — static specs for the supported knowledge graph backends.
//!
//! Each `ProviderSpec` describes how to reach a backend and what to say when
//! it cannot be reached or answers with something unreadable.

use kgbot_core::error::SpokenFallbacks;
use kgbot_core::types::ProviderKind;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one knowledge graph backend.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Which backend this is.
    pub kind: ProviderKind,
    /// Config name (e.g. `"together"`).
    pub name: &'static str,
    /// Human-readable name for logs. E.g. `"Together API"`.
    pub display_name: &'static str,
    /// Default API base URL. `None` when an SDK client owns the transport.
    pub default_api_base: Option<&'static str>,
    /// Path appended to the API base for the completion call.
    pub endpoint_path: &'static str,
    /// What to speak on transport and unreadable-reply failures.
    pub fallbacks: SpokenFallbacks,
}

impl ProviderSpec {
    /// Full endpoint URL for an API base (trailing slashes tolerated).
    pub fn endpoint_url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.endpoint_path)
    }
}

// ─────────────────────────────────────────────
// All providers
// ─────────────────────────────────────────────

/// Conversational search, audio streamed through the SDK client.
pub static HOUNDIFY: ProviderSpec = ProviderSpec {
    kind: ProviderKind::Houndify,
    name: "houndify",
    display_name: "Houndify",
    default_api_base: None,
    endpoint_path: "",
    fallbacks: SpokenFallbacks {
        transport: "There was an error making the request to Houndify.",
        no_response: "Houndify returned no response.",
    },
};

/// Legacy completions endpoint.
pub static OPENAI: ProviderSpec = ProviderSpec {
    kind: ProviderKind::OpenAi,
    name: "openai",
    display_name: "OpenAI",
    default_api_base: Some("https://api.openai.com"),
    endpoint_path: "/v1/completions",
    fallbacks: SpokenFallbacks {
        transport: "There was an error making the request to OpenAI.",
        no_response: "OpenAI returned no response.",
    },
};

/// Together inference endpoint.
pub static TOGETHER: ProviderSpec = ProviderSpec {
    kind: ProviderKind::Together,
    name: "together",
    display_name: "Together API",
    default_api_base: Some("https://api.together.xyz"),
    endpoint_path: "/inference",
    fallbacks: SpokenFallbacks {
        transport: "There was an error making the request to Together API",
        no_response: "Together API returned no response.",
    },
};

/// Complete list of supported provider specifications.
pub static PROVIDERS: &[&ProviderSpec] = &[&HOUNDIFY, &OPENAI, &TOGETHER];

/// Look up a spec by provider kind. `ProviderKind::None` has no spec.
pub fn find_by_kind(kind: ProviderKind) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().copied().find(|s| s.kind == kind)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_but_none_has_spec() {
        assert!(find_by_kind(ProviderKind::Houndify).is_some());
        assert!(find_by_kind(ProviderKind::OpenAi).is_some());
        assert!(find_by_kind(ProviderKind::Together).is_some());
        assert!(find_by_kind(ProviderKind::None).is_none());
    }

    #[test]
    fn test_names_match_kinds() {
        for spec in PROVIDERS {
            assert_eq!(ProviderKind::from_name(spec.name), spec.kind);
            assert_eq!(find_by_kind(spec.kind).unwrap().name, spec.name);
        }
    }

    #[test]
    fn test_default_endpoints() {
        let openai = find_by_kind(ProviderKind::OpenAi).unwrap();
        assert_eq!(
            openai.endpoint_url(openai.default_api_base.unwrap()),
            "https://api.openai.com/v1/completions"
        );

        let together = find_by_kind(ProviderKind::Together).unwrap();
        assert_eq!(
            together.endpoint_url(together.default_api_base.unwrap()),
            "https://api.together.xyz/inference"
        );
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let together = find_by_kind(ProviderKind::Together).unwrap();
        assert_eq!(
            together.endpoint_url("http://127.0.0.1:9000/"),
            "http://127.0.0.1:9000/inference"
        );
    }

    #[test]
    fn test_fallbacks_are_non_empty() {
        for spec in PROVIDERS {
            assert!(!spec.fallbacks.transport.is_empty());
            assert!(!spec.fallbacks.no_response.is_empty());
        }
    }
}
