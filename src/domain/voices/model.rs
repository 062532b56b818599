use serde::{Deserialize, Serialize};

/// A voice as listed by `GET /v1/voices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub models: Vec<VoiceModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceModel {
    pub name: String,
    #[serde(default)]
    pub languages: Vec<VoiceLanguage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceLanguage {
    pub locale: String,
}

impl VoiceRecord {
    /// True when any of the voice's models lists `locale`
    pub fn supports_locale(&self, locale: &str) -> bool {
        self.models
            .iter()
            .any(|model| model.languages.iter().any(|lang| lang.locale == locale))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Condensed view used by the per-language listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSummary {
    pub voice_id: String,
    pub name: String,
    pub gender: String,
    pub tags: Vec<String>,
}

impl From<&VoiceRecord> for VoiceSummary {
    fn from(voice: &VoiceRecord) -> Self {
        Self {
            voice_id: voice.id.clone(),
            name: voice.display_name.clone(),
            gender: voice.gender.clone(),
            tags: voice.tags.clone(),
        }
    }
}
