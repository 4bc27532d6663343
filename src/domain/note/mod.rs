//! Note domain module

mod normalizer;
mod payload;

pub use normalizer::{heuristic_extract, strict_parse, NormalizerContext, ResponseNormalizer};
pub use payload::{
    placeholder_title, NotePayload, NO_CONTENT_MESSAGE, TITLE_MAX_CHARS,
    TRANSCRIPTION_UNCLEAR_MESSAGE,
};
