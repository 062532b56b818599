pub mod speechify_tts_repository;
pub mod tts_repository;

pub use speechify_tts_repository::SpeechifyTtsRepository;
pub use tts_repository::{
    SpeechOptions, SpeechRequest, SynthesizedAudio, TtsRepository, TtsRepositoryError,
};
