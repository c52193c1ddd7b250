use super::types::ErrorResponse;
use crate::{Error, Result, config::CorsConfig};
use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::error;

pub const SERVER_ERROR: &str = "Server error";

/// One entry of the CORS allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    Exact(String),
    /// `scheme://*.suffix`: any non-empty subdomain of `suffix`.
    Subdomain { scheme: String, suffix: String },
}

impl OriginPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim().trim_end_matches('/');
        let (scheme, host) = pattern
            .split_once("://")
            .ok_or_else(|| Error::config(format!("CORS origin '{}' has no scheme", pattern)))?;

        if scheme.is_empty() || host.is_empty() {
            return Err(Error::config(format!("Invalid CORS origin '{}'", pattern)));
        }

        match host.strip_prefix("*.") {
            Some(suffix) if !suffix.is_empty() && !suffix.contains('*') => Ok(Self::Subdomain {
                scheme: scheme.to_ascii_lowercase(),
                suffix: suffix.to_ascii_lowercase(),
            }),
            None if !host.contains('*') => Ok(Self::Exact(pattern.to_ascii_lowercase())),
            _ => Err(Error::config(format!(
                "Unsupported wildcard in CORS origin '{}'",
                pattern
            ))),
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        let origin = origin.to_ascii_lowercase();
        match self {
            Self::Exact(exact) => origin == *exact,
            Self::Subdomain { scheme, suffix } => {
                let Some(host) = origin
                    .strip_prefix(scheme.as_str())
                    .and_then(|rest| rest.strip_prefix("://"))
                else {
                    return false;
                };
                host.strip_suffix(suffix.as_str())
                    .and_then(|label| label.strip_suffix('.'))
                    .is_some_and(|label| !label.is_empty() && !label.ends_with('.'))
            }
        }
    }
}

pub fn parse_origins(origins: &[String]) -> Result<Vec<OriginPattern>> {
    origins.iter().map(|o| OriginPattern::parse(o)).collect()
}

pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let patterns = parse_origins(&config.allowed_origins)?;

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        origin
            .to_str()
            .is_ok_and(|origin| patterns.iter().any(|p| p.matches(origin)))
    });

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials))
}

/// Hardening headers applied to every response unless a handler set them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'self';base-uri 'self';font-src 'self' https: data:;form-action 'self';frame-ancestors 'self';img-src 'self' data:;object-src 'none';script-src 'self';script-src-attr 'none';style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// Adds [`SECURITY_HEADERS`] to every response from `router`, CORS preflight
/// answers included when `router` already carries the CORS layer.
pub fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS
        .iter()
        .fold(router, |router, &(name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

/// Last-resort handler for panics escaping a route.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Server error: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(SERVER_ERROR)),
    )
        .into_response()
}
