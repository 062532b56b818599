use super::model::VoiceRecord;

/// Criteria for [`filter_voices`]. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceFilter {
    pub gender: Option<String>,
    pub locale: Option<String>,
    pub tags: Vec<String>,
}

impl VoiceFilter {
    pub fn matches(&self, voice: &VoiceRecord) -> bool {
        if let Some(gender) = self.gender.as_deref().filter(|g| !g.is_empty()) {
            if !voice.gender.eq_ignore_ascii_case(gender) {
                return false;
            }
        }

        if let Some(locale) = self.locale.as_deref().filter(|l| !l.is_empty()) {
            if !voice.supports_locale(locale) {
                return false;
            }
        }

        self.tags.iter().all(|tag| voice.has_tag(tag))
    }
}

/// Model ids of every voice matching `filter`, flattened in input order.
/// A model shared by two matching voices appears twice.
pub fn filter_voices(voices: &[VoiceRecord], filter: &VoiceFilter) -> Vec<String> {
    voices
        .iter()
        .filter(|voice| filter.matches(voice))
        .flat_map(|voice| voice.models.iter().map(|model| model.name.clone()))
        .collect()
}

/// Membership check against a catalog snapshot
pub fn voice_exists(voices: &[VoiceRecord], voice_id: &str) -> bool {
    !voice_id.is_empty() && voices.iter().any(|voice| voice.id == voice_id)
}
