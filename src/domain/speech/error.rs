use crate::error::AppError;
use crate::infrastructure::audio::AudioError;
use crate::infrastructure::repositories::TtsRepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("synthesis failed: {0}")]
    Synthesis(String),
    #[error("playback failed: {0}")]
    Playback(#[from] AudioError),
    #[error("audio file error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl SpeechServiceError {
    /// Errors that no amount of retrying will fix
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Authentication(_))
    }
}

impl From<TtsRepositoryError> for SpeechServiceError {
    fn from(err: TtsRepositoryError) -> Self {
        match err {
            TtsRepositoryError::MissingCredential => {
                SpeechServiceError::Configuration(err.to_string())
            }
            TtsRepositoryError::Unauthorized { .. } => {
                SpeechServiceError::Authentication(err.to_string())
            }
            _ => SpeechServiceError::Synthesis(err.to_string()),
        }
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Configuration(msg) => AppError::Configuration(msg),
            SpeechServiceError::Authentication(msg) => AppError::Unauthorized(msg),
            SpeechServiceError::Synthesis(msg) => AppError::ExternalService(msg),
            SpeechServiceError::Playback(e) => AppError::Playback(e.to_string()),
            SpeechServiceError::Scratch(e) => AppError::Io(e),
        }
    }
}
