use crate::domain::voices::VoiceRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters of a single synthesis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub input: String,
    pub voice_id: String,
    pub audio_format: String,
    pub language: String,
    pub model: String,
    pub options: SpeechOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechOptions {
    pub loudness_normalization: bool,
    pub text_normalization: bool,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            loudness_normalization: true,
            text_normalization: true,
        }
    }
}

/// Decoded audio returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub audio_data: Vec<u8>,
    pub billable_characters_count: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TtsRepositoryError {
    #[error("API credential is not configured")]
    MissingCredential,
    #[error("credential rejected (status {status}): {message}")]
    Unauthorized { status: u16, message: String },
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider so the speech pipeline and the
/// voice catalog can be exercised against fakes.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `request.input` and return the decoded audio bytes
    ///
    /// # Errors
    /// `Unauthorized` and `MissingCredential` are never worth retrying;
    /// every other variant is transient from the caller's point of view.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedAudio, TtsRepositoryError>;

    /// Fetch the provider's full voice catalog
    async fn list_voices(&self) -> Result<Vec<VoiceRecord>, TtsRepositoryError>;
}
