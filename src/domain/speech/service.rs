use super::error::SpeechServiceError;
use super::progress::{AttemptGuard, ProgressCallback};
use super::retry::{RetryDecision, RetryPolicy};
use super::shaper::{shape_with, PhrasePicker, RandomPicker};
use super::synthesizer::Synthesizer;
use crate::domain::voices::VoiceCatalogService;
use crate::infrastructure::audio::AudioEngine;
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::TtsRepository;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::Instrument;
use uuid::Uuid;

/// Roughly ten status polls per second
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Interrupted,
}

/// Speaks assistant text: synthesize, play, poll, retry.
///
/// Owns the audio engine, so `speak` takes `&mut self` and sessions can
/// never overlap.
pub struct SpeechService {
    synthesizer: Synthesizer,
    engine: Box<dyn AudioEngine>,
    retry_policy: RetryPolicy,
    picker: Box<dyn PhrasePicker>,
    poll_interval: Duration,
}

impl SpeechService {
    pub fn new(
        config: Arc<Config>,
        tts_repo: Arc<dyn TtsRepository>,
        catalog: Arc<VoiceCatalogService>,
        engine: Box<dyn AudioEngine>,
    ) -> Self {
        let retry_policy = RetryPolicy::default()
            .with_max_attempts(config.max_attempts)
            .with_backoff(config.retry_backoff());

        Self {
            synthesizer: Synthesizer::new(config, tts_repo, catalog),
            engine,
            retry_policy,
            picker: Box::new(RandomPicker),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_phrase_picker(mut self, picker: impl PhrasePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        // tokio intervals reject a zero period
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn scratch_path(&self) -> &Path {
        self.synthesizer.scratch_path()
    }

    /// Shape `text` for speech, then speak it
    pub async fn text_to_speech<P>(&mut self, text: &str, progress: &mut P) -> bool
    where
        P: ProgressCallback + ?Sized,
    {
        self.try_text_to_speech(text, progress).await.is_ok()
    }

    pub async fn try_text_to_speech<P>(
        &mut self,
        text: &str,
        progress: &mut P,
    ) -> Result<PlaybackOutcome, SpeechServiceError>
    where
        P: ProgressCallback + ?Sized,
    {
        let shaped = shape_with(text, self.picker.as_mut());
        self.try_speak(&shaped, progress).await
    }

    /// Speak `text`, retrying failed attempts according to the retry policy.
    ///
    /// Returns `true` once an attempt plays to completion or is stopped by
    /// the callback, `false` when the policy gives up.
    pub async fn speak<P>(&mut self, text: &str, progress: &mut P) -> bool
    where
        P: ProgressCallback + ?Sized,
    {
        self.try_speak(text, progress).await.is_ok()
    }

    /// Like [`Self::speak`], but hands back the error of the last attempt
    /// when the policy gives up.
    pub async fn try_speak<P>(
        &mut self,
        text: &str,
        progress: &mut P,
    ) -> Result<PlaybackOutcome, SpeechServiceError>
    where
        P: ProgressCallback + ?Sized,
    {
        let utterance_id = Uuid::new_v4();
        let span = tracing::info_span!("speak", utterance_id = %utterance_id);

        async move {
            tracing::info!(text_length = text.len(), "Speaking utterance");

            let mut attempt: u32 = 0;
            loop {
                attempt += 1;

                let err = match self.attempt(text, progress).await {
                    Ok(outcome) => {
                        tracing::info!(attempt, outcome = ?outcome, "Utterance spoken");
                        return Ok(outcome);
                    }
                    Err(err) => err,
                };

                match self.retry_policy.decide(&err, attempt) {
                    RetryDecision::GiveUp => {
                        tracing::error!(error = %err, attempt, fatal = err.is_fatal(), "Giving up on utterance");
                        return Err(err);
                    }
                    RetryDecision::Retry => {
                        tracing::warn!(error = %err, attempt, "Speech attempt failed, retrying");
                        let backoff = self.retry_policy.backoff();
                        if !backoff.is_zero() {
                            tokio::time::sleep(backoff).await;
                        }
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// One synthesize-and-play pass. The guard sends the closing signal and
    /// tears down the engine however this returns.
    async fn attempt<P>(&mut self, text: &str, progress: &mut P) -> Result<PlaybackOutcome, SpeechServiceError>
    where
        P: ProgressCallback + ?Sized,
    {
        let mut guard = AttemptGuard::new(self.engine.as_mut(), progress);

        let billable_characters = self.synthesizer.synthesize_to_scratch(text).await?;
        tracing::debug!(billable_characters, "Utterance synthesized");

        let engine = guard.engine();
        engine.init()?;
        engine.load(self.synthesizer.scratch_path())?;
        engine.play()?;

        // First poll one interval after play, not immediately
        let mut ticker = tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while guard.engine().is_busy() {
            if !guard.progress().tick() {
                tracing::info!("Playback stopped by caller");
                return Ok(PlaybackOutcome::Interrupted);
            }
            ticker.tick().await;
        }

        Ok(PlaybackOutcome::Completed)
    }
}
