use super::{middleware::SERVER_ERROR, types::ErrorResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

pub const PAYLOAD_TOO_LARGE: &str = "Payload too large";

type BodyRejection = (StatusCode, Json<ErrorResponse>);

/// JSON body extractor that reads a missing body as `{}`.
///
/// Bodies without a JSON content type are ignored. A top-level array carries
/// no named fields and also reads as `{}`. Anything that fails to parse, or a
/// bare scalar document, is a server error that never reaches the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            error!("Failed to read request body: {}", rejection.body_text());
            match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => {
                    body_rejection(StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE)
                }
                _ => body_rejection(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR),
            }
        })?;

        if !is_json {
            debug!("Ignoring request body without a JSON content type");
            return Ok(Self(T::default()));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let document = serde_json::from_slice::<Value>(&bytes).map_err(parse_failed)?;
        let fields = match document {
            Value::Object(fields) => fields,
            Value::Array(_) => Map::new(),
            other => {
                error!(
                    "Failed to parse request body: top-level {} is not an object",
                    kind(&other)
                );
                return Err(body_rejection(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR));
            }
        };

        serde_json::from_value(Value::Object(fields))
            .map(Self)
            .map_err(parse_failed)
    }
}

fn body_rejection(status: StatusCode, message: &str) -> BodyRejection {
    (status, Json(ErrorResponse::new(message)))
}

fn parse_failed(err: serde_json::Error) -> BodyRejection {
    error!("Failed to parse request body: {}", err);
    body_rejection(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Absent, `null`, `false`, `0` and `""` all count as "not provided".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads an optional text field. A truthy value that is not a string is an error.
pub fn text_field<'a>(value: Option<&'a Value>, field: &'static str) -> Result<Option<&'a str>> {
    match value {
        None => Ok(None),
        Some(value) if !is_truthy(value) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(Error::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

/// Reflects a caller-supplied value back unchanged, or `default` when it is falsy.
pub fn echo_or(value: Option<Value>, default: &str) -> Value {
    value
        .filter(is_truthy)
        .unwrap_or_else(|| Value::String(default.to_string()))
}
