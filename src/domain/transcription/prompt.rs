//! Transcription prompt value object

/// Fixed instruction sent alongside every recording
const NOTE_INSTRUCTION: &str = r#"Please transcribe the following audio recording exactly as spoken. Do not add any analysis, interpretation, or additional information.

Instructions:
1. Extract only the actual words spoken by the user
2. Create a short title from the main topic mentioned
3. Put the exact transcribed content in the content field
4. Do not add commentary, analysis, or explanations about the audio quality

Return your response in this exact JSON format (no additional text or markdown):
{
  "title": "Short title based on what was said (max 60 characters)",
  "content": "Exact transcription of what the user said, nothing more"
}

Rules:
- Only transcribe the actual spoken words
- Do not add phrases like "The audio recording consisted of" or "Following the statement"
- Do not analyze audio quality or add interpretations
- Keep the content as the raw transcribed speech
- If unclear, just write what you can understand, don't explain why it's unclear"#;

/// Value object holding the instruction that accompanies the audio.
/// Built once per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionPrompt {
    content: String,
}

impl TranscriptionPrompt {
    /// Build the verbatim-transcription note prompt
    pub fn note() -> Self {
        Self {
            content: NOTE_INSTRUCTION.to_string(),
        }
    }

    /// Build a prompt with custom instruction text
    pub fn custom(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Default for TranscriptionPrompt {
    fn default() -> Self {
        Self::note()
    }
}
