//! Response decoding and error mapping.
//!
//! # Design
//! Success bodies use the API envelope `{status, message, data}`. Most
//! endpoints return a single resource and the target is decoded from the
//! `data` object; anything else in that position is a decode error. Listings
//! (`{meta, data: [..]}`), array payloads and data-less acknowledgements are
//! decoded from the whole body instead, selected by `ResponseShape::Envelope`.
//! The target is only assigned after decoding fully succeeds.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::encode::json_type;
use crate::error::{ApiError, Result};
use crate::http::HttpResponse;

const MAX_LOG_BODY_LENGTH: usize = 200;

/// Which part of a success body the target is decoded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// The `data` member, which must be a JSON object.
    #[default]
    Data,
    /// The whole body.
    Envelope,
}

/// The error payload returned in failed response bodies. The accompanying
/// `status: false` member is not needed to classify the failure.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    code: Option<String>,
}

/// Accept any JSON value for an optional text member. Numbers and other
/// scalars are rendered as text; `null` becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn decode_error(message: impl Into<String>, response: &HttpResponse) -> ApiError {
    ApiError::Decode {
        message: message.into(),
        body: response.body.clone(),
    }
}

/// Decode `response` into `result`, or map it to an `ApiError`.
///
/// `result` is left untouched on every error path.
pub fn decode_response<Res>(response: &HttpResponse, shape: ResponseShape, result: &mut Res) -> Result<()>
where
    Res: DeserializeOwned,
{
    if !response.is_success() {
        return Err(map_error(response));
    }

    let envelope: Value =
        serde_json::from_str(&response.body).map_err(|e| decode_error(e.to_string(), response))?;

    if envelope.get("status").and_then(Value::as_bool) == Some(false) {
        return Err(map_error(response));
    }

    let source = match shape {
        ResponseShape::Envelope => envelope,
        ResponseShape::Data => match envelope {
            Value::Object(mut members) => match members.remove("data") {
                Some(data @ Value::Object(_)) => data,
                Some(other) => {
                    return Err(decode_error(
                        format!("expected `data` to be an object, found {}", json_type(&other)),
                        response,
                    ))
                }
                None => return Err(decode_error("response has no `data` member", response)),
            },
            other => {
                return Err(decode_error(
                    format!("expected a JSON object body, found {}", json_type(&other)),
                    response,
                ))
            }
        },
    };

    let decoded = serde_json::from_value(source).map_err(|e| decode_error(e.to_string(), response))?;
    *result = decoded;
    Ok(())
}

/// Build the error for a failed response.
///
/// Bodies that are not an error payload fall back to `ApiError::Status`.
pub fn map_error(response: &HttpResponse) -> ApiError {
    match serde_json::from_str::<ErrorPayload>(&response.body) {
        Ok(payload) => {
            tracing::warn!(
                status = response.status,
                api_message = %payload.message,
                body = %sanitize_for_log(&response.body),
                "API request failed"
            );
            ApiError::Api {
                status: response.status,
                message: payload.message,
                kind: payload.kind,
                code: payload.code,
                body: response.body.clone(),
            }
        }
        Err(_) => {
            tracing::warn!(
                status = response.status,
                body = %sanitize_for_log(&response.body),
                "API request failed with unreadable error body"
            );
            ApiError::Status {
                status: response.status,
            }
        }
    }
}

/// Truncate long bodies and strip control characters before logging.
fn sanitize_for_log(body: &str) -> String {
    let truncated: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
    let mut sanitized: String = truncated
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect();
    if body.chars().count() > MAX_LOG_BODY_LENGTH {
        sanitized.push_str(&format!("... [truncated, {} bytes total]", body.len()));
    }
    sanitized
}
