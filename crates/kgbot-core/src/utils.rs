//! Utility helpers — path resolution and text shaping for spoken answers.

use std::path::PathBuf;

/// Get the kgbot data directory (e.g. `~/.kgbot/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".kgbot")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe. Used for log previews.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Cut `text` down to whole sentences so it fits a speech budget.
///
/// Splits on `.`, trims each sentence, drops empty ones, and re-joins with
/// `". "`. Sentences are taken greedily in order until the next one would
/// push `accepted + sentence + output` past `max_length` (all byte lengths).
/// The output length is counted on top of the accepted sentence lengths, so
/// the effective budget is about half of `max_length`. Callers rely on this
/// exact cut-off.
///
/// Never splits a sentence. If the first sentence does not fit, the result
/// is empty.
pub fn truncate_sentences(text: &str, max_length: usize) -> String {
    let mut output = String::new();
    let mut accepted = 0usize;

    for sentence in text.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        if accepted + sentence.len() + output.len() > max_length {
            break;
        }
        if !output.is_empty() {
            output.push_str(". ");
        }
        output.push_str(sentence);
        accepted += sentence.len();
    }

    output
}
