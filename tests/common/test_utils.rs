use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`
use voice_agent_brain::{
    advisor::TemplateSelector,
    clock::{Clock, SystemClock},
    config::Config,
    server::{self, handlers::AppState},
};

/// Create a test configuration with the production defaults
pub fn create_test_config() -> Config {
    Config::default()
}

/// Full application with default state and middleware
pub fn create_test_app() -> Router {
    let config = create_test_config();
    server::app(AppState::new(&config), &config).unwrap()
}

/// Full application with injected clock and template selector
pub fn create_test_app_with(
    clock: Arc<dyn Clock>,
    selector: Arc<dyn TemplateSelector>,
) -> Router {
    let config = create_test_config();
    let state = AppState::with_collaborators(&config, clock, selector);
    server::app(state, &config).unwrap()
}

pub fn create_test_app_with_selector(selector: Arc<dyn TemplateSelector>) -> Router {
    create_test_app_with(Arc::new(SystemClock), selector)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Chat reply text for `message`
pub async fn chat_reply(app: &Router, message: &str) -> String {
    let request = json_request(
        "POST",
        "/api/proxy/chat",
        &serde_json::json!({ "message": message }),
    );
    let body = body_json(send(app, request).await).await;
    body["response"].as_str().unwrap().to_string()
}

/// The three generic templates, as they render for `message`
pub fn fallback_texts(message: &str) -> [String; 3] {
    [
        format!(
            "Interesting point about: \"{message}\". In workflow automation, this relates to optimizing data flow and reducing bottlenecks."
        ),
        format!(
            "Thank you for sharing: \"{message}\". Let me analyze this from a workflow efficiency perspective."
        ),
        format!(
            "You mentioned: \"{message}\". This is important for workflow design - would you like me to elaborate on optimization strategies?"
        ),
    ]
}
