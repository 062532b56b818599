pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Speechify synthesis models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechModel {
    English,
    Multilingual,
}

impl SpeechModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechModel::English => "simba-english",
            SpeechModel::Multilingual => "simba-multilingual",
        }
    }

    /// English-only model for `en*` languages, multilingual otherwise
    pub fn for_language(language: &str) -> Self {
        if language.starts_with("en") {
            SpeechModel::English
        } else {
            SpeechModel::Multilingual
        }
    }
}

impl std::fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extract the locale prefix of a voice id ("en-US-JennyNeural" -> "en-US")
pub fn locale_from_voice_id(voice_id: &str) -> Option<String> {
    let mut parts = voice_id.split('-');
    match (parts.next(), parts.next()) {
        (Some(lang), Some(region)) => Some(format!("{}-{}", lang, region)),
        _ => None,
    }
}

/// Resolved voice, language and model for a synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    pub voice_id: String,
    pub language: String,
    pub model: SpeechModel,
}

impl VoiceSelection {
    /// Selection for a known-good voice id.
    /// An explicit language wins over the voice id's locale prefix.
    pub fn for_voice(voice_id: &str, language: Option<&str>) -> Self {
        let language = language
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| locale_from_voice_id(voice_id))
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let model = SpeechModel::for_language(&language);

        Self {
            voice_id: voice_id.to_string(),
            language,
            model,
        }
    }

    /// Resolve from configuration.
    ///
    /// `configured_is_known` reports whether the provider recognizes the
    /// configured voice; when it does not (or no voice is configured) the
    /// default voice is used and the language derives from it.
    pub fn resolve(
        configured_voice: Option<&str>,
        configured_is_known: bool,
        default_voice: &str,
        language: Option<&str>,
    ) -> Self {
        let voice_id = match configured_voice.filter(|v| !v.is_empty()) {
            Some(voice) if configured_is_known => voice,
            Some(voice) => {
                tracing::warn!(
                    configured_voice = %voice,
                    fallback_voice = %default_voice,
                    "Configured voice not recognized, falling back to default"
                );
                default_voice
            }
            None => default_voice,
        };

        Self::for_voice(voice_id, language)
    }
}
