use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.sws.speechify.com";
pub const DEFAULT_VOICE_ID: &str = "default";
pub const DEFAULT_SCRATCH_PATH: &str = "Data/speech.mp3";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Speechify
    pub speechify_token: Option<String>,
    pub speechify_base_url: String,
    // Voice selection
    pub assistant_voice: Option<String>,
    pub assistant_language: Option<String>,
    pub default_voice: String,
    pub voice_validation_enabled: bool,
    // Playback
    pub scratch_path: PathBuf,
    // Retry policy
    pub max_attempts: Option<u32>,
    pub retry_backoff_ms: u64,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speechify_token: None,
            speechify_base_url: DEFAULT_BASE_URL.to_string(),
            assistant_voice: None,
            assistant_language: None,
            default_voice: DEFAULT_VOICE_ID.to_string(),
            voice_validation_enabled: true,
            scratch_path: PathBuf::from(DEFAULT_SCRATCH_PATH),
            max_attempts: None,
            retry_backoff_ms: 0,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            // The legacy camel-case keys are still honoured for existing .env files
            speechify_token: non_empty_var(&["SPEECHIFY_TOKEN", "SpeechifyToken"]),
            speechify_base_url: env::var("SPEECHIFY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            assistant_voice: non_empty_var(&["ASSISTANT_VOICE", "AssistantVoice"]),
            assistant_language: non_empty_var(&["ASSISTANT_LANGUAGE"]),
            default_voice: env::var("SPEECHIFY_DEFAULT_VOICE")
                .unwrap_or_else(|_| DEFAULT_VOICE_ID.to_string()),
            voice_validation_enabled: env::var("VOICE_VALIDATION_ENABLED")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            scratch_path: env::var("SPEECH_SCRATCH_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCRATCH_PATH)),
            max_attempts: match env::var("SPEECH_MAX_ATTEMPTS") {
                Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse().map_err(|e| {
                    AppError::Configuration(format!("SPEECH_MAX_ATTEMPTS: {}", e))
                })?),
                _ => None,
            },
            retry_backoff_ms: env::var("SPEECH_RETRY_BACKOFF_MS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|e| AppError::Configuration(format!("SPEECH_RETRY_BACKOFF_MS: {}", e)))?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(LogFormat::Pretty),
        };

        Ok(config)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

fn non_empty_var(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
