pub mod engine;
pub mod rodio_engine;
pub mod scratch;

pub use engine::{AudioEngine, AudioError};
pub use rodio_engine::RodioAudioEngine;
pub use scratch::ScratchFile;
