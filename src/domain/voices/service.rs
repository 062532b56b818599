use super::filter::{filter_voices, voice_exists, VoiceFilter};
use super::model::{VoiceRecord, VoiceSummary};
use crate::domain::speech::{SpeechServiceError, VoiceSelection};
use crate::infrastructure::repositories::{SpeechOptions, SpeechRequest, TtsRepository, TtsRepositoryError};
use moka::future::Cache;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const CATALOG_KEY: &str = "voices";
const CATALOG_TTL: Duration = Duration::from_secs(10 * 60);

pub const AUDITION_TEXT: &str = "Hello, this is a test of the Speechify API.";

/// Voice discovery and validation on top of the provider catalog.
///
/// Listing failures are logged and degrade to an empty catalog; nothing
/// here returns an error to the caller.
pub struct VoiceCatalogService {
    tts_repo: Arc<dyn TtsRepository>,
    cache: Cache<&'static str, Arc<Vec<VoiceRecord>>>,
}

impl VoiceCatalogService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_TTL)
            .build();

        Self { tts_repo, cache }
    }

    /// Full catalog, served from cache while fresh
    pub async fn fetch_catalog(&self) -> Result<Arc<Vec<VoiceRecord>>, TtsRepositoryError> {
        if let Some(cached) = self.cache.get(&CATALOG_KEY).await {
            tracing::debug!(voice_count = cached.len(), "Voice catalog cache hit");
            return Ok(cached);
        }

        let voices = Arc::new(self.tts_repo.list_voices().await?);
        self.cache.insert(CATALOG_KEY, voices.clone()).await;
        Ok(voices)
    }

    pub async fn list_voices(&self) -> Vec<VoiceRecord> {
        match self.fetch_catalog().await {
            Ok(voices) => voices.as_ref().clone(),
            Err(TtsRepositoryError::MissingCredential) => {
                tracing::warn!("Speechify token not configured, voice catalog unavailable");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "Error listing voices");
                Vec::new()
            }
        }
    }

    pub async fn filter_voices(&self, filter: &VoiceFilter) -> Vec<String> {
        filter_voices(&self.list_voices().await, filter)
    }

    pub async fn is_valid_voice(&self, voice_id: &str) -> bool {
        if voice_id.is_empty() {
            return false;
        }
        voice_exists(&self.list_voices().await, voice_id)
    }

    /// Like [`Self::is_valid_voice`] but distinguishes "unknown voice" from
    /// "catalog unavailable", so callers can avoid caching a fallback decision
    /// made during an outage.
    pub async fn check_voice(&self, voice_id: &str) -> Result<bool, TtsRepositoryError> {
        if voice_id.is_empty() {
            return Ok(false);
        }
        let voices = self.fetch_catalog().await?;
        Ok(voice_exists(&voices, voice_id))
    }

    /// Voices offering `locale` in any of their models, one entry per voice
    pub async fn list_voices_by_language(&self, locale: &str) -> Vec<VoiceSummary> {
        self.list_voices()
            .await
            .iter()
            .filter(|voice| voice.supports_locale(locale))
            .map(VoiceSummary::from)
            .collect()
    }

    /// Synthesize sample text with `voice_id` and save it to `output`.
    /// Returns false on any failure.
    pub async fn audition_voice(&self, voice_id: &str, text: &str, output: &Path) -> bool {
        match self.try_audition_voice(voice_id, text, output).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, voice_id = %voice_id, "Error testing voice");
                false
            }
        }
    }

    /// Fallible audition; returns the billable character count
    pub async fn try_audition_voice(
        &self,
        voice_id: &str,
        text: &str,
        output: &Path,
    ) -> Result<u64, SpeechServiceError> {
        let selection = VoiceSelection::for_voice(voice_id, None);

        tracing::info!(
            voice_id = %selection.voice_id,
            language = %selection.language,
            model = %selection.model,
            "Testing voice"
        );

        let request = SpeechRequest {
            input: text.to_string(),
            voice_id: selection.voice_id.clone(),
            audio_format: "mp3".to_string(),
            language: selection.language.clone(),
            model: selection.model.as_str().to_string(),
            options: SpeechOptions::default(),
        };

        let audio = self.tts_repo.synthesize(&request).await?;
        tokio::fs::write(output, &audio.audio_data).await?;

        tracing::info!(
            path = %output.display(),
            billable_characters = audio.billable_characters_count,
            "Audio saved"
        );
        Ok(audio.billable_characters_count)
    }
}
