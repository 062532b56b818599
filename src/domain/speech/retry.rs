use super::error::SpeechServiceError;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Retryable,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    GiveUp,
}

pub type ErrorClassifier = Arc<dyn Fn(&SpeechServiceError) -> ErrorClass + Send + Sync>;

/// Fatal for configuration and authentication errors, retryable otherwise
pub fn default_classifier(err: &SpeechServiceError) -> ErrorClass {
    if err.is_fatal() {
        ErrorClass::Fatal
    } else {
        ErrorClass::Retryable
    }
}

/// How `speak` reacts to a failed attempt.
///
/// The default keeps trying forever with no pause between attempts; only a
/// fatal error stops it.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    backoff: Duration,
    classifier: ErrorClassifier,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            backoff: Duration::ZERO,
            classifier: Arc::new(default_classifier),
        }
    }
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts.filter(|n| *n > 0);
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_classifier<F>(mut self, classifier: F) -> Self
    where
        F: Fn(&SpeechServiceError) -> ErrorClass + Send + Sync + 'static,
    {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub fn classify(&self, err: &SpeechServiceError) -> ErrorClass {
        (self.classifier)(err)
    }

    /// Decide what to do after `attempt` (1-based) failed with `err`
    pub fn decide(&self, err: &SpeechServiceError, attempt: u32) -> RetryDecision {
        if self.classify(err) == ErrorClass::Fatal {
            return RetryDecision::GiveUp;
        }
        match self.max_attempts {
            Some(max) if attempt >= max => RetryDecision::GiveUp,
            _ => RetryDecision::Retry,
        }
    }
}
