//! Essay input form: draft state, length gates, and upload decoding.
//!
//! Three independent "too short" thresholds exist and are kept separate:
//! the hard submission gate counts characters, the submit control counts
//! words, and the warning banner counts words against a higher bar.

pub mod upload;

use serde::Serialize;

/// Trimmed character count must exceed this for a submission to be accepted.
pub const DEFAULT_MIN_ESSAY_CHARS: usize = 50;
/// Submit control is disabled below this word count.
pub const DEFAULT_MIN_SUBMIT_WORDS: usize = 10;
/// Short-essay warning shows for word counts from 1 up to (excluding) this value.
pub const DEFAULT_SHORT_WARNING_WORDS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormThresholds {
    pub min_essay_chars: usize,
    pub min_submit_words: usize,
    pub short_warning_words: usize,
}

impl Default for FormThresholds {
    fn default() -> Self {
        Self {
            min_essay_chars: DEFAULT_MIN_ESSAY_CHARS,
            min_submit_words: DEFAULT_MIN_SUBMIT_WORDS,
            short_warning_words: DEFAULT_SHORT_WARNING_WORDS,
        }
    }
}

/// Number of non-empty whitespace-delimited tokens in the trimmed text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Character (not byte) count of the trimmed text.
pub fn trimmed_char_count(text: &str) -> usize {
    text.trim().chars().count()
}

/// What the user has typed or uploaded. Survives retries and resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EssayDraft {
    pub essay_text: String,
    pub prompt_text: String,
}

impl EssayDraft {
    pub fn new(essay_text: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            essay_text: essay_text.into(),
            prompt_text: prompt_text.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.essay_text)
    }

    /// The assignment prompt to send, verbatim, or `None` when blank.
    pub fn assignment_prompt(&self) -> Option<&str> {
        let prompt = self.prompt_text.as_str();
        (!prompt.trim().is_empty()).then_some(prompt)
    }

    /// Hard gate: the essay is long enough to be sent for grading.
    pub fn meets_submission_gate(&self, thresholds: &FormThresholds) -> bool {
        trimmed_char_count(&self.essay_text) > thresholds.min_essay_chars
    }

    /// Whether the submit control is enabled.
    pub fn submit_enabled(&self, thresholds: &FormThresholds, grading: bool) -> bool {
        !grading && self.word_count() >= thresholds.min_submit_words
    }

    /// Non-blocking warning for essays with some, but few, words.
    pub fn shows_short_warning(&self, thresholds: &FormThresholds) -> bool {
        let words = self.word_count();
        words > 0 && words < thresholds.short_warning_words
    }
}

/// Derived form flags, computed once per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub word_count: usize,
    pub submit_enabled: bool,
    pub short_warning: bool,
    pub controls_disabled: bool,
}

impl FormStatus {
    pub fn of(draft: &EssayDraft, thresholds: &FormThresholds, grading: bool) -> Self {
        Self {
            word_count: draft.word_count(),
            submit_enabled: draft.submit_enabled(thresholds, grading),
            short_warning: draft.shows_short_warning(thresholds),
            controls_disabled: grading,
        }
    }
}
