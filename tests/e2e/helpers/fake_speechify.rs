use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const VALID_TOKEN: &str = "test-speechify-token";

/// How the fake answers the next synthesis call
#[derive(Debug, Clone)]
pub enum SpeechReply {
    Audio(Vec<u8>),
    Status(u16, String),
    /// 200 with an audio payload that is not valid base64
    CorruptAudio,
}

#[derive(Default)]
struct FakeState {
    speech_script: VecDeque<SpeechReply>,
    speech_requests: Vec<Value>,
    voices: Vec<Value>,
    voice_requests: usize,
    voices_status: Option<u16>,
}

/// In-process stand-in for the Speechify HTTP API
#[derive(Clone, Default)]
pub struct FakeSpeechify {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSpeechify {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/v1/audio/speech", post(speech))
            .route("/v1/voices", get(voices))
            .with_state(self.clone())
    }

    /// Queue replies; once drained, every call returns `default-audio`
    pub fn script(&self, replies: Vec<SpeechReply>) {
        self.state.lock().unwrap().speech_script.extend(replies);
    }

    pub fn set_voices(&self, voices: Vec<Value>) {
        self.state.lock().unwrap().voices = voices;
    }

    pub fn fail_voices(&self, status: u16) {
        self.state.lock().unwrap().voices_status = Some(status);
    }

    pub fn speech_requests(&self) -> Vec<Value> {
        self.state.lock().unwrap().speech_requests.clone()
    }

    pub fn voice_requests(&self) -> usize {
        self.state.lock().unwrap().voice_requests
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", VALID_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid API key"}))).into_response()
}

async fn speech(
    State(fake): State<FakeSpeechify>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let reply = {
        let mut state = fake.state.lock().unwrap();
        state.speech_requests.push(body.clone());
        state.speech_script.pop_front()
    };

    if !authorized(&headers) {
        return unauthorized();
    }

    let input_len = body["input"].as_str().map(|s| s.chars().count()).unwrap_or(0);

    match reply.unwrap_or_else(|| SpeechReply::Audio(b"default-audio".to_vec())) {
        SpeechReply::Audio(bytes) => Json(json!({
            "audio_data": STANDARD.encode(bytes),
            "audio_format": "mp3",
            "billable_characters_count": input_len,
            "speech_marks": null
        }))
        .into_response(),
        SpeechReply::Status(status, message) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({ "message": message })),
        )
            .into_response(),
        SpeechReply::CorruptAudio => Json(json!({
            "audio_data": "!!! not base64 !!!",
            "audio_format": "mp3",
            "billable_characters_count": input_len
        }))
        .into_response(),
    }
}

async fn voices(State(fake): State<FakeSpeechify>, headers: HeaderMap) -> Response {
    let (voices, status) = {
        let mut state = fake.state.lock().unwrap();
        state.voice_requests += 1;
        (state.voices.clone(), state.voices_status)
    };

    if !authorized(&headers) {
        return unauthorized();
    }
    if let Some(status) = status {
        return StatusCode::from_u16(status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response();
    }

    Json(Value::Array(voices)).into_response()
}

/// A voice record shaped like the real catalog entries
pub fn voice_json(id: &str, gender: &str, locales: &[&str], tags: &[&str]) -> Value {
    let languages: Vec<Value> = locales
        .iter()
        .map(|l| json!({ "locale": l, "preview_audio": null }))
        .collect();

    json!({
        "id": id,
        "display_name": id,
        "gender": gender,
        "locale": locales.first().copied().unwrap_or("en-US"),
        "type": "shared",
        "avatar_image": null,
        "preview_audio": null,
        "tags": tags,
        "models": [
            { "name": "simba-english", "languages": languages.clone() },
            { "name": "simba-multilingual", "languages": languages }
        ]
    })
}
