//! Typed reply shapes for each backend and the normalizers that reduce them
//! to one spoken answer.
//!
//! Every normalizer takes the raw response body. Undecodable bodies and
//! missing or mistyped fields become `KnowledgeError::MalformedReply`;
//! failures the backend reports itself become `KnowledgeError::Backend`.
//! Nothing in here panics on bad input.

use serde::Deserialize;

use kgbot_core::error::KnowledgeError;
use kgbot_core::utils::truncate_sentences;

/// Longest Together answer handed to the speech budget.
pub const TOGETHER_MAX_ANSWER_LEN: usize = 1000;

/// End-of-sequence marker some Together models leave on their output.
pub const END_OF_SEQUENCE: &str = "</s>";

/// Spoken when Together sends no choices.
pub const ANSWER_NOT_FOUND: &str = "Answer was not found";

/// Houndify error when the query produced nothing to say.
pub const NO_RESULTS: &str = "no results to return";

// ─────────────────────────────────────────────
// Houndify
// ─────────────────────────────────────────────

/// Houndify conversational search reply (the fields we read).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HoundifyReply {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Sent as a JSON number; some replies encode it as a float.
    #[serde(default)]
    pub num_to_return: f64,
    #[serde(default)]
    pub all_results: Vec<HoundifyResult>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HoundifyResult {
    pub spoken_response_long: String,
}

/// Extract the spoken answer from a Houndify reply.
pub fn normalize_houndify(body: &[u8]) -> Result<String, KnowledgeError> {
    let reply: HoundifyReply = serde_json::from_slice(body)?;

    if !reply.status.eq_ignore_ascii_case("OK") {
        return Err(KnowledgeError::Backend(
            reply.error_message.unwrap_or_default(),
        ));
    }
    if reply.num_to_return < 1.0 {
        return Err(KnowledgeError::Backend(NO_RESULTS.to_string()));
    }

    let first = reply.all_results.into_iter().next().ok_or_else(|| {
        KnowledgeError::MalformedReply("NumToReturn set but AllResults is empty".into())
    })?;
    non_empty(first.spoken_response_long)
}

// ─────────────────────────────────────────────
// Completion APIs
// ─────────────────────────────────────────────

/// One generated completion.
#[derive(Clone, Debug, Deserialize)]
pub struct TextChoice {
    pub text: String,
}

/// Together `/inference` reply.
#[derive(Clone, Debug, Deserialize)]
pub struct TogetherReply {
    pub output: TogetherOutput,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TogetherOutput {
    pub choices: Vec<TextChoice>,
}

/// OpenAI `/v1/completions` reply.
#[derive(Clone, Debug, Deserialize)]
pub struct OpenAiReply {
    pub choices: Vec<TextChoice>,
}

/// Extract the answer from a Together reply.
///
/// Takes the first choice, drops a trailing `</s>`, and cuts the text to whole
/// sentences within [`TOGETHER_MAX_ANSWER_LEN`].
pub fn normalize_together(body: &[u8]) -> Result<String, KnowledgeError> {
    let reply: TogetherReply = serde_json::from_slice(body)?;

    let Some(choice) = reply.output.choices.into_iter().next() else {
        return Err(KnowledgeError::Backend(ANSWER_NOT_FOUND.to_string()));
    };

    let text = choice
        .text
        .strip_suffix(END_OF_SEQUENCE)
        .unwrap_or(choice.text.as_str());
    non_empty(truncate_sentences(text, TOGETHER_MAX_ANSWER_LEN))
}

/// Extract the answer from an OpenAI completions reply: first choice, trimmed.
pub fn normalize_openai(body: &[u8]) -> Result<String, KnowledgeError> {
    let reply: OpenAiReply = serde_json::from_slice(body)?;

    let choice = reply
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| KnowledgeError::MalformedReply("no choices".into()))?;
    non_empty(choice.text.trim().to_string())
}

fn non_empty(text: String) -> Result<String, KnowledgeError> {
    if text.trim().is_empty() {
        Err(KnowledgeError::MalformedReply("empty answer".into()))
    } else {
        Ok(text)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
