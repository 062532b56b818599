use super::tts_repository::{SpeechRequest, SynthesizedAudio, TtsRepository, TtsRepositoryError};
use crate::domain::voices::VoiceRecord;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde::Deserialize;

const SPEECH_PATH: &str = "/v1/audio/speech";
const VOICES_PATH: &str = "/v1/voices";

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    audio_data: String,
    #[serde(default)]
    audio_format: Option<String>,
    #[serde(default)]
    billable_characters_count: u64,
}

/// Speechify implementation of TTS repository
pub struct SpeechifyTtsRepository {
    base_url: String,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl SpeechifyTtsRepository {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http_client: reqwest::Client::new(),
        }
    }

    fn token(&self) -> Result<&str, TtsRepositoryError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(TtsRepositoryError::MissingCredential)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response onto the error taxonomy using the status code
    async fn error_from_response(response: reqwest::Response) -> TtsRepositoryError {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TtsRepositoryError::Unauthorized {
                status: status.as_u16(),
                message,
            },
            StatusCode::TOO_MANY_REQUESTS => TtsRepositoryError::RateLimited(message),
            _ => TtsRepositoryError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl TtsRepository for SpeechifyTtsRepository {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedAudio, TtsRepositoryError> {
        let token = self.token()?;
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = %request.voice_id,
            language = %request.language,
            model = %request.model,
            text_length = request.input.len(),
            text_preview = %request.input.chars().take(200).collect::<String>(),
            "Calling Speechify TTS API"
        );

        let response = self
            .http_client
            .post(self.url(SPEECH_PATH))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Speechify TTS request failed");
                TtsRepositoryError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response).await;
            tracing::error!(error = %err, voice_id = %request.voice_id, "Speechify TTS API call failed");
            return Err(err);
        }

        let body: SpeechResponse = response
            .json()
            .await
            .map_err(|e| TtsRepositoryError::MalformedResponse(format!("invalid JSON: {}", e)))?;

        let audio_data = STANDARD
            .decode(body.audio_data.as_bytes())
            .map_err(|e| TtsRepositoryError::MalformedResponse(format!("invalid base64 audio: {}", e)))?;

        tracing::info!(
            provider = "speechify",
            model = %request.model,
            voice_id = %request.voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            audio_format = body.audio_format.as_deref().unwrap_or("unknown"),
            audio_size_bytes = audio_data.len(),
            billable_characters = body.billable_characters_count,
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            audio_data,
            billable_characters_count: body.billable_characters_count,
        })
    }

    async fn list_voices(&self) -> Result<Vec<VoiceRecord>, TtsRepositoryError> {
        let token = self.token()?;

        let response = self
            .http_client
            .get(self.url(VOICES_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TtsRepositoryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let voices: Vec<VoiceRecord> = response
            .json()
            .await
            .map_err(|e| TtsRepositoryError::MalformedResponse(format!("invalid voice list: {}", e)))?;

        tracing::debug!(voice_count = voices.len(), "Speechify voice catalog fetched");

        Ok(voices)
    }
}
