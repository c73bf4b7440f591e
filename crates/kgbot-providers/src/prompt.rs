//! Prompt templates for the completion APIs.
//!
//! Requests mentioning a "story" get a bedtime-story prompt; everything else
//! is treated as a question for the assistant.

/// Word that switches a request to the bedtime-story prompt.
pub const STORY_TRIGGER: &str = "story";

/// Story subjects by keyword, checked in order. First match wins.
pub const STORY_SUBJECTS: &[(&str, &str)] = &[
    ("fairy", "a fairy tale"),
    ("magic", "a magical kingdom"),
    ("stars", "stars at night"),
];

/// Subject when no keyword matches.
pub const DEFAULT_STORY_SUBJECT: &str = "small children";

const STORY_PROMPT_PREFIX: &str = "You are a friendly robot and your job is to help children. \
The child wants to go to sleep. Could you narrate a story to the child so that she goes to \
sleep peacefully? The story must be about ";
const STORY_PROMPT_SUFFIX: &str = ". The story must have at most 1000 letters.";

const QUESTION_PROMPT_PREFIX: &str = "You are a helpful robot called ";
const QUESTION_PROMPT_BODY: &str = ". You will be given a question asked by a user and you \
must provide the best answer you can. It may not be punctuated or spelled correctly. Keep the \
answer concise yet informative. Here is the question: ";
const QUESTION_PROMPT_SUFFIX: &str = " , Answer: ";

/// Pick the story subject for a transcript.
pub fn story_subject(transcript: &str) -> &'static str {
    STORY_SUBJECTS
        .iter()
        .find(|(keyword, _)| transcript.contains(keyword))
        .map(|(_, subject)| *subject)
        .unwrap_or(DEFAULT_STORY_SUBJECT)
}

/// Build the completion prompt for a transcript.
pub fn build_prompt(transcript: &str, assistant_name: &str) -> String {
    if transcript.contains(STORY_TRIGGER) {
        format!(
            "{STORY_PROMPT_PREFIX}{}{STORY_PROMPT_SUFFIX}",
            story_subject(transcript)
        )
    } else {
        format!(
            "{QUESTION_PROMPT_PREFIX}{assistant_name}{QUESTION_PROMPT_BODY}\"{transcript}\"{QUESTION_PROMPT_SUFFIX}"
        )
    }
}
