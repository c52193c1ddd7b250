use super::{
    payload::{JsonBody, echo_or, text_field},
    types::{
        AuthConfigureResponse, ChatRequest, ChatResponse, DEFAULT_USER_ID, DEFAULT_VOICE_ID,
        DEFAULT_VOICE_TEXT, Endpoints, ErrorResponse, HealthResponse, RootResponse,
        STATUS_SUCCESS, VoiceRequest, VoiceResponse,
    },
};
use crate::{
    Error,
    advisor::{Advisor, RandomSelector, TemplateSelector},
    auth::TokenIssuer,
    clock::{Clock, SystemClock, iso_timestamp},
    config::{Config, SiteConfig},
};
use axum::{extract::State, http::StatusCode, response::Json};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{error, info};

pub const CHAT_PATH: &str = "/api/proxy/chat";
pub const VOICE_PATH: &str = "/api/proxy/voice";
pub const HEALTH_PATH: &str = "/health";
pub const AUTH_CONFIGURE_PATH: &str = "/api/auth/configure";

pub const MESSAGE_REQUIRED: &str = "Message required";
pub const CHAT_FAILED: &str = "Chat processing failed";
pub const NOT_FOUND: &str = "Not found";

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub clock: Arc<dyn Clock>,
    pub advisor: Arc<Advisor>,
    pub tokens: Arc<TokenIssuer>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let selector: Arc<dyn TemplateSelector> = match config.advisor.seed {
            Some(seed) => Arc::new(RandomSelector::seeded(seed)),
            None => Arc::new(RandomSelector::new()),
        };
        Self::with_collaborators(config, Arc::new(SystemClock), selector)
    }

    pub fn with_collaborators(
        config: &Config,
        clock: Arc<dyn Clock>,
        selector: Arc<dyn TemplateSelector>,
    ) -> Self {
        let ttl = Duration::from_secs(config.auth.token_ttl_secs);
        Self {
            started_at: Instant::now(),
            tokens: Arc::new(TokenIssuer::new(Arc::clone(&clock), ttl)),
            advisor: Arc::new(Advisor::new(selector)),
            site: Arc::new(config.site.clone()),
            clock,
        }
    }

    fn timestamp(&self) -> String {
        iso_timestamp(self.clock.now())
    }
}

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

fn processing_failed(context: &str, err: &Error, message: &str) -> ApiError {
    error!("{} error: {}", context, err);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        status: state.site.status_message.clone(),
        website: state.site.website.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: state.timestamp(),
        endpoints: Endpoints {
            chat: CHAT_PATH,
            voice: VOICE_PATH,
            health: HEALTH_PATH,
        },
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        uptime: state.started_at.elapsed().as_secs(),
        timestamp: state.timestamp(),
    })
}

pub async fn chat(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = text_field(request.message.as_ref(), "message")
        .map_err(|e| processing_failed("Chat", &e, CHAT_FAILED))?
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, MESSAGE_REQUIRED))?;

    let user_id = echo_or(request.user_id, DEFAULT_USER_ID);

    let reply = state
        .advisor
        .reply(message)
        .map_err(|e| processing_failed("Chat", &e, CHAT_FAILED))?;

    info!(user_id = %user_id, rule = reply.rule, "Answered chat message");

    Ok(Json(ChatResponse {
        response: reply.text,
        timestamp: state.timestamp(),
        user_id,
        status: STATUS_SUCCESS,
    }))
}

/// Echoes `text` and `voiceId` back; nothing is synthesised yet.
pub async fn voice(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<VoiceRequest>,
) -> Json<VoiceResponse> {
    let text = echo_or(request.text, DEFAULT_VOICE_TEXT);
    let voice_id = echo_or(request.voice_id, DEFAULT_VOICE_ID);

    info!(voice_id = %voice_id, "Processed voice request without synthesis");

    Json(VoiceResponse {
        message: "Voice processing complete",
        text,
        voice_id,
        audio_url: None,
        timestamp: state.timestamp(),
        status: STATUS_SUCCESS,
    })
}

/// The request body is ignored; the issued tokens are placeholders.
pub async fn configure_auth(State(state): State<AppState>) -> Json<AuthConfigureResponse> {
    let tokens = state.tokens.issue();
    info!("Issued demo session tokens");

    Json(AuthConfigureResponse {
        message: "Configuration received",
        session_token: tokens.session_token,
        csrf_token: tokens.csrf_token,
        expires: tokens.expires_at_ms,
        status: STATUS_SUCCESS,
    })
}

pub async fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, NOT_FOUND)
}
