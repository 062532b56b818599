use super::error::SpeechServiceError;
use super::selection::VoiceSelection;
use crate::domain::voices::VoiceCatalogService;
use crate::infrastructure::audio::ScratchFile;
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::{SpeechOptions, SpeechRequest, TtsRepository};
use std::path::Path;
use std::sync::Arc;

pub const AUDIO_FORMAT: &str = "mp3";

/// Text → scratch file half of a speak attempt
pub struct Synthesizer {
    config: Arc<Config>,
    tts_repo: Arc<dyn TtsRepository>,
    catalog: Arc<VoiceCatalogService>,
    scratch: ScratchFile,
    selection: Option<VoiceSelection>,
}

impl Synthesizer {
    pub fn new(
        config: Arc<Config>,
        tts_repo: Arc<dyn TtsRepository>,
        catalog: Arc<VoiceCatalogService>,
    ) -> Self {
        Self {
            scratch: ScratchFile::new(config.scratch_path.clone()),
            config,
            tts_repo,
            catalog,
            selection: None,
        }
    }

    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// Resolve the voice once and keep it, unless the catalog could not be
    /// reached, in which case the configured voice is used as-is this time.
    pub async fn voice_selection(&mut self) -> VoiceSelection {
        if let Some(selection) = &self.selection {
            return selection.clone();
        }

        let language = self.config.assistant_language.as_deref();
        let configured = self.config.assistant_voice.as_deref().filter(|v| !v.is_empty());

        let (known, cacheable) = match configured {
            None => (false, true),
            Some(_) if !self.config.voice_validation_enabled => (true, true),
            Some(voice) => match self.catalog.check_voice(voice).await {
                Ok(known) => (known, true),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        voice_id = %voice,
                        "Voice catalog unavailable, using configured voice unvalidated"
                    );
                    (true, false)
                }
            },
        };

        let selection = VoiceSelection::resolve(configured, known, &self.config.default_voice, language);

        tracing::info!(
            voice_id = %selection.voice_id,
            language = %selection.language,
            model = %selection.model,
            "Voice selection resolved"
        );

        if cacheable {
            self.selection = Some(selection.clone());
        }
        selection
    }

    /// Clear the scratch file, synthesize `text` and write the audio there
    pub async fn synthesize_to_scratch(&mut self, text: &str) -> Result<u64, SpeechServiceError> {
        self.scratch.clear().await?;

        let selection = self.voice_selection().await;
        let request = SpeechRequest {
            input: text.to_string(),
            voice_id: selection.voice_id,
            audio_format: AUDIO_FORMAT.to_string(),
            language: selection.language,
            model: selection.model.as_str().to_string(),
            options: SpeechOptions::default(),
        };

        let audio = self.tts_repo.synthesize(&request).await?;
        self.scratch.write(&audio.audio_data).await?;

        tracing::debug!(
            path = %self.scratch.path().display(),
            audio_size_bytes = audio.audio_data.len(),
            "Scratch audio written"
        );

        Ok(audio.billable_characters_count)
    }
}
