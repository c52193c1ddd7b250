use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_SUCCESS: &str = "success";
pub const DEFAULT_USER_ID: &str = "anonymous";
pub const DEFAULT_VOICE_ID: &str = "default";
pub const DEFAULT_VOICE_TEXT: &str =
    "Hello! I am your AI workflow advisor, ready to help optimize your n8n automations!";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: String,
    pub website: String,
    pub version: String,
    pub timestamp: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub chat: &'static str,
    pub voice: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime: u64,
    pub timestamp: String,
}

/// `message` stays untyped so that `false`, `0` and `""` count as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
    /// Caller's `userId` as sent, any JSON type.
    pub user_id: Value,
    pub status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub voice_id: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub message: &'static str,
    pub text: Value,
    pub voice_id: Value,
    /// Always null until speech synthesis exists.
    pub audio_url: Option<String>,
    pub timestamp: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfigureResponse {
    pub message: &'static str,
    pub session_token: String,
    pub csrf_token: String,
    pub expires: i64,
    pub status: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
