//! Turns raw model text into a usable note.
//!
//! The model is asked for a strict `{title, content}` JSON object but may
//! wrap it in markdown fences, surround it with chatter, or ignore the
//! format entirely. Normalization runs an ordered chain of strategies and
//! takes the first one that yields a payload:
//!
//! 1. [`strict_parse`]: fence-stripped, brace-delimited JSON object with
//!    string `title` and `content` fields.
//! 2. [`heuristic_extract`]: title from the first line, content from the
//!    whole text.
//!
//! Blank fields are then replaced with placeholders, so the result is
//! never empty. A structurally valid object always wins over the
//! heuristics, however thin its content looks.

use chrono::{Local, NaiveDate};
use serde_json::Value;

use super::payload::{
    placeholder_title, NotePayload, NO_CONTENT_MESSAGE, TITLE_MAX_CHARS,
    TRANSCRIPTION_UNCLEAR_MESSAGE,
};

const FENCE: &str = "```";

/// Maximum length of a title derived from free text
const DERIVED_TITLE_MAX_CHARS: usize = 80;

/// Free text shorter than this is treated as a failed transcription
const MIN_CONTENT_CHARS: usize = 10;

/// Inputs to normalization that do not come from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerContext {
    /// Date used in placeholder titles
    pub date: NaiveDate,
}

impl NormalizerContext {
    pub fn today() -> Self {
        Self {
            date: Local::now().date_naive(),
        }
    }
}

type Strategy = fn(&str, &NormalizerContext) -> Option<NotePayload>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("strict_parse", strict_parse),
    ("heuristic_extract", heuristic_extract),
];

/// Normalizes raw model output into a [`NotePayload`]. Never fails.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    context: Option<NormalizerContext>,
}

impl ResponseNormalizer {
    /// Normalizer that stamps placeholders with the current local date
    pub fn new() -> Self {
        Self { context: None }
    }

    /// Normalizer with a fixed context
    pub fn with_context(context: NormalizerContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn normalize(&self, raw: &str) -> NotePayload {
        let context = self.context.unwrap_or_else(NormalizerContext::today);

        let payload = STRATEGIES
            .iter()
            .find_map(|(name, strategy)| {
                let payload = strategy(raw, &context);
                match payload {
                    Some(_) => tracing::debug!(strategy = *name, "normalized model response"),
                    None => tracing::warn!(
                        strategy = *name,
                        raw_len = raw.len(),
                        "normalization strategy did not apply"
                    ),
                }
                payload
            })
            .unwrap_or_else(|| NotePayload::new("", ""));

        enforce_non_empty(payload, &context)
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the first JSON object in the fence-stripped text.
///
/// Both `title` and `content` must be present and be strings.
pub fn strict_parse(raw: &str, _context: &NormalizerContext) -> Option<NotePayload> {
    let cleaned = strip_code_fences(raw);
    let object = first_object_span(&cleaned)?;

    let value: Value = serde_json::from_str(object).ok()?;
    let title = value.get("title")?.as_str()?;
    let content = value.get("content")?.as_str()?;

    Some(NotePayload::new(title, content))
}

/// Derive a note from unstructured text. Always yields a payload.
pub fn heuristic_extract(raw: &str, context: &NormalizerContext) -> Option<NotePayload> {
    let title = raw
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(derive_title)
        .filter(|title| !title.is_empty() && title.chars().count() < TITLE_MAX_CHARS)
        .map(|title| truncate_chars(&title, DERIVED_TITLE_MAX_CHARS).trim().to_string())
        .unwrap_or_else(|| placeholder_title(context.date));

    let content = strip_code_fences(raw).trim().to_string();
    let content = if content.chars().count() < MIN_CONTENT_CHARS {
        TRANSCRIPTION_UNCLEAR_MESSAGE.to_string()
    } else {
        content
    };

    Some(NotePayload::new(title, content))
}

fn enforce_non_empty(payload: NotePayload, context: &NormalizerContext) -> NotePayload {
    let title = if payload.title.trim().is_empty() {
        placeholder_title(context.date)
    } else {
        payload.title
    };
    let content = if payload.content.trim().is_empty() {
        NO_CONTENT_MESSAGE.to_string()
    } else {
        payload.content
    };
    NotePayload { title, content }
}

/// Keep word characters and whitespace only
fn derive_title(line: &str) -> String {
    line.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Remove markdown fence markers.
///
/// A line holding only a fence (optionally followed by a language tag such
/// as `json`) is dropped; fences embedded in other lines are removed in place.
fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !is_fence_line(line))
        .map(|line| line.replace(FENCE, ""))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_fence_line(line: &str) -> bool {
    line.trim()
        .strip_prefix(FENCE)
        .is_some_and(|tag| tag.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'))
}

/// Slice from the first `{` to its matching `}`.
///
/// Braces inside JSON strings are skipped. When the object never closes the
/// span runs to the last `}` instead, leaving rejection to the JSON parser.
fn first_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
