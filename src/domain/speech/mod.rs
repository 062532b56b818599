pub mod error;
pub mod progress;
pub mod retry;
pub mod selection;
pub mod service;
pub mod shaper;
pub mod synthesizer;

pub use error::SpeechServiceError;
pub use progress::{AttemptGuard, NoProgress, PlaybackSignal, ProgressCallback};
pub use retry::{default_classifier, ErrorClass, RetryDecision, RetryPolicy};
pub use selection::{locale_from_voice_id, SpeechModel, VoiceSelection};
pub use service::{PlaybackOutcome, SpeechService, POLL_INTERVAL};
pub use shaper::{
    is_redirect_phrase, shape, shape_with, FixedPicker, PhrasePicker, RandomPicker,
    REDIRECT_PHRASES,
};
pub use synthesizer::Synthesizer;
