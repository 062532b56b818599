/// Languages accepted by the Speechify models, as (display name, code).
/// The first six are fully supported, the rest are in beta.
const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("French", "fr-FR"),
    ("German", "de-DE"),
    ("Spanish", "es-ES"),
    ("Portuguese (Brazil)", "pt-BR"),
    ("Portuguese (Portugal)", "pt-PT"),
    ("Arabic", "ar-AE"),
    ("Danish", "da-DK"),
    ("Dutch", "nl-NL"),
    ("Estonian", "et-EE"),
    ("Finnish", "fi-FI"),
    ("Greek", "el-GR"),
    ("Hebrew", "he-IL"),
    ("Hindi", "hi-IN"),
    ("Italian", "it-IT"),
    ("Japanese", "ja-JP"),
    ("Norwegian", "nb-NO"),
    ("Polish", "pl-PL"),
    ("Russian", "ru-RU"),
    ("Swedish", "sv-SE"),
    ("Turkish", "tr-TR"),
    ("Ukrainian", "uk-UA"),
    ("Vietnamese", "vi-VN"),
];

const FULLY_SUPPORTED_COUNT: usize = 6;

pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    SUPPORTED_LANGUAGES
}

/// True for languages outside the fully supported set
pub fn is_beta_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES
        .iter()
        .position(|(_, c)| *c == code)
        .map(|index| index >= FULLY_SUPPORTED_COUNT)
        .unwrap_or(false)
}
