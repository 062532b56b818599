pub mod filter;
pub mod languages;
pub mod model;
pub mod service;

pub use filter::{filter_voices, voice_exists, VoiceFilter};
pub use languages::{is_beta_language, supported_languages};
pub use model::{VoiceLanguage, VoiceModel, VoiceRecord, VoiceSummary};
pub use service::{VoiceCatalogService, AUDITION_TEXT};
