//! Audio data value object

use std::fmt;

use crate::domain::error::ValidationError;

/// Declared types that are not `audio/*` but carry audio anyway.
/// Browser recorders commonly label opus-in-webm and aac-in-mp4 as video.
const MISLABELED_AUDIO_TYPES: &[(&str, AudioMimeType)] = &[
    ("video/webm", AudioMimeType::Webm),
    ("video/mp4", AudioMimeType::Mp4),
    ("application/ogg", AudioMimeType::Ogg),
];

/// Audio MIME types accepted for transcription
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AudioMimeType {
    Ogg,
    Mp3,
    Mpeg,
    Wav,
    Webm,
    Mp4,
    Flac,
    /// Any other `audio/*` subtype, stored lowercase without parameters
    Other(String),
}

impl AudioMimeType {
    /// Resolve a declared media type into an accepted audio type.
    ///
    /// Parameters such as `;codecs=opus` are ignored and matching is
    /// case-insensitive. Anything that is neither `audio/*` nor one of the
    /// known mislabeled types is rejected.
    pub fn from_declared(declared: &str) -> Result<Self, ValidationError> {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if let Some((_, mime)) = MISLABELED_AUDIO_TYPES
            .iter()
            .find(|(label, _)| *label == essence)
        {
            return Ok(mime.clone());
        }

        let Some(subtype) = essence.strip_prefix("audio/") else {
            return Err(ValidationError::UnsupportedMediaType {
                mime_type: declared.to_string(),
            });
        };

        let mime = match subtype {
            "ogg" => Self::Ogg,
            "mp3" => Self::Mp3,
            "mpeg" => Self::Mpeg,
            "wav" | "x-wav" | "wave" => Self::Wav,
            "webm" => Self::Webm,
            "mp4" => Self::Mp4,
            "flac" | "x-flac" => Self::Flac,
            "" => {
                return Err(ValidationError::UnsupportedMediaType {
                    mime_type: declared.to_string(),
                })
            }
            _ => Self::Other(essence.clone()),
        };
        Ok(mime)
    }

    /// Get the MIME type string sent to the transcription service
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mp3",
            Self::Mpeg => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
            Self::Flac => "audio/flac",
            Self::Other(mime) => mime,
        }
    }

    /// Get the file extension used for the staged artifact
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ogg => "ogg",
            Self::Mp3 | Self::Mpeg => "mp3",
            Self::Wav => "wav",
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Flac => "flac",
            Self::Other(_) => "audio",
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AudioMimeType {
    fn default() -> Self {
        Self::Webm
    }
}

/// Value object representing audio data ready for transcription.
/// Contains raw audio bytes and its MIME type.
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl AudioData {
    /// Create AudioData from raw bytes
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> &AudioMimeType {
        &self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the audio data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}
