use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio device error: {0}")]
    Device(String),
    #[error("could not decode audio: {0}")]
    Decode(String),
    #[error("audio file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("audio engine not initialized")]
    NotInitialized,
}

/// Local playback capability.
///
/// A session is `init` → `load` → `play` → (`is_busy` polled) → `stop` →
/// `release`. `stop` and `release` must be safe to call on an engine that
/// was never initialized, since cleanup runs on every exit path.
///
/// Not `Send`: platform output streams are bound to the thread that opened them.
pub trait AudioEngine {
    fn init(&mut self) -> Result<(), AudioError>;

    fn load(&mut self, path: &Path) -> Result<(), AudioError>;

    fn play(&mut self) -> Result<(), AudioError>;

    fn is_busy(&self) -> bool;

    fn stop(&mut self) -> Result<(), AudioError>;

    fn release(&mut self) -> Result<(), AudioError>;
}
