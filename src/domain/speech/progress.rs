use crate::infrastructure::audio::AudioEngine;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// What the progress callback is being told
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// Playback is still running; return `false` to stop it
    Tick,
    /// The attempt is over, whatever its outcome
    Done,
}

/// Caller-side hook polled during playback.
///
/// `tick` runs about ten times per second while audio plays. `finish` runs
/// exactly once at the end of every attempt, including failed ones.
pub trait ProgressCallback {
    fn tick(&mut self) -> bool;

    fn finish(&mut self);
}

impl<F> ProgressCallback for F
where
    F: FnMut(PlaybackSignal) -> bool,
{
    fn tick(&mut self) -> bool {
        self(PlaybackSignal::Tick)
    }

    fn finish(&mut self) {
        self(PlaybackSignal::Done);
    }
}

/// Never interrupts and ignores the closing signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn tick(&mut self) -> bool {
        true
    }

    fn finish(&mut self) {}
}

/// Scoped cleanup for one `speak` attempt.
///
/// On drop: send the closing signal, then stop and release the engine.
/// Failures in any of these are logged and swallowed.
pub struct AttemptGuard<'a, E: AudioEngine + ?Sized, P: ProgressCallback + ?Sized> {
    engine: &'a mut E,
    progress: &'a mut P,
}

impl<'a, E: AudioEngine + ?Sized, P: ProgressCallback + ?Sized> AttemptGuard<'a, E, P> {
    pub fn new(engine: &'a mut E, progress: &'a mut P) -> Self {
        Self { engine, progress }
    }

    pub fn engine(&mut self) -> &mut E {
        &mut *self.engine
    }

    pub fn progress(&mut self) -> &mut P {
        &mut *self.progress
    }
}

impl<E: AudioEngine + ?Sized, P: ProgressCallback + ?Sized> Drop for AttemptGuard<'_, E, P> {
    fn drop(&mut self) {
        let progress = &mut *self.progress;
        if catch_unwind(AssertUnwindSafe(|| progress.finish())).is_err() {
            tracing::warn!("Progress callback panicked on closing signal");
        }
        if let Err(e) = self.engine.stop() {
            tracing::warn!(error = %e, "Error stopping playback");
        }
        if let Err(e) = self.engine.release() {
            tracing::warn!(error = %e, "Error releasing audio engine");
        }
    }
}
