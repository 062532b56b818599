use super::engine::{AudioEngine, AudioError};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open output device plus the sink that plays into it.
/// The stream must outlive the sink, so both are kept together.
struct Session {
    sink: Sink,
    _handle: OutputStreamHandle,
    _stream: OutputStream,
}

/// Default-device playback through rodio
#[derive(Default)]
pub struct RodioAudioEngine {
    session: Option<Session>,
}

impl RodioAudioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn sink(&self) -> Result<&Sink, AudioError> {
        self.session
            .as_ref()
            .map(|s| &s.sink)
            .ok_or(AudioError::NotInitialized)
    }
}

impl AudioEngine for RodioAudioEngine {
    fn init(&mut self) -> Result<(), AudioError> {
        if self.session.is_some() {
            return Ok(());
        }

        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;
        // Nothing plays until `play` is called
        sink.pause();

        tracing::debug!("Audio output stream opened");

        self.session = Some(Session {
            sink,
            _handle: handle,
            _stream: stream,
        });
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        let sink = self.sink()?;
        let file = File::open(path)?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode(e.to_string()))?;

        sink.clear();
        sink.append(source);
        // `clear` leaves the sink paused
        sink.pause();

        tracing::debug!(path = %path.display(), "Audio loaded");
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.sink()?.play();
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.sink().map(|sink| !sink.empty()).unwrap_or(false)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        if let Some(session) = &self.session {
            session.sink.stop();
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), AudioError> {
        if self.session.take().is_some() {
            tracing::debug!("Audio output stream released");
        }
        Ok(())
    }
}
