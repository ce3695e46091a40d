//! Request encoding: JSON bodies and query-string payloads.
//!
//! # Design
//! A request value is serialized through `serde_json::Value` once, then
//! rendered either as a JSON body or as URL query parameters. GET requests
//! always use the query form. DELETE endpoints differ across the API, so
//! the choice is made per endpoint via `BodyEncoding`.
//!
//! Optional request fields are `Option<T>` with
//! `skip_serializing_if = "Option::is_none"`: `None` is omitted from both
//! encodings, while `Some(false)` or `Some(0)` is transmitted.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{ApiError, Result};
use crate::http::HttpMethod;

/// How a request value travels on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// JSON body with `Content-Type: application/json`.
    #[default]
    Json,
    /// Flattened into URL query parameters; no body is sent.
    Query,
}

/// The path (possibly extended with a query string) and optional body for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    pub path: String,
    pub body: Option<String>,
}

/// Encode `request` for `method`.
///
/// An absent request yields no body and leaves `path` untouched.
pub fn encode_request<Req>(
    method: HttpMethod,
    path: &str,
    request: Option<&Req>,
    encoding: BodyEncoding,
) -> Result<EncodedRequest>
where
    Req: Serialize + ?Sized,
{
    let Some(request) = request else {
        return Ok(EncodedRequest {
            path: path.to_string(),
            body: None,
        });
    };

    if method == HttpMethod::Get || encoding == BodyEncoding::Query {
        let value = serde_json::to_value(request).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let pairs = flatten_query(value)?;
        return Ok(EncodedRequest {
            path: append_query(path, &pairs),
            body: None,
        });
    }

    let body = serde_json::to_string(request).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(EncodedRequest {
        path: path.to_string(),
        body: Some(body),
    })
}

/// Flatten a JSON object into query pairs.
///
/// `null` members are skipped, arrays repeat their key, and nested objects
/// are sent as compact JSON. Anything other than an object or `null` at the
/// top level is a caller error.
pub fn flatten_query(value: Value) -> Result<Vec<(String, String)>> {
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::InvalidRequest(format!(
                "query payload must be an object, got {}",
                json_type(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(rendered) = scalar(item) {
                        pairs.push((key.clone(), rendered));
                    }
                }
            }
            other => {
                if let Some(rendered) = scalar(other) {
                    pairs.push((key, rendered));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Append url-encoded `pairs` to `path`, extending any existing query string.
pub fn append_query(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    let query = serializer.finish();
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Toggle {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<bool>,
    }

    #[test]
    fn absent_request_has_no_body() {
        let encoded = encode_request::<()>(HttpMethod::Post, "/split", None, BodyEncoding::Json).unwrap();
        assert_eq!(encoded.path, "/split");
        assert!(encoded.body.is_none());
    }

    #[test]
    fn explicit_false_is_sent_and_none_is_omitted() {
        let toggle = Toggle {
            name: None,
            active: Some(false),
        };
        let encoded = encode_request(HttpMethod::Put, "/split/1", Some(&toggle), BodyEncoding::Json).unwrap();
        let body: Value = serde_json::from_str(encoded.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"active": false}));
    }

    #[test]
    fn get_payload_becomes_query() {
        let filter = json!({"status": "pending", "transaction": null, "active": true});
        let encoded =
            encode_request(HttpMethod::Get, "/dispute?perPage=10&page=1", Some(&filter), BodyEncoding::Json)
                .unwrap();
        assert!(encoded.body.is_none());
        assert!(encoded.path.starts_with("/dispute?perPage=10&page=1&"));
        assert!(encoded.path.contains("status=pending"));
        assert!(encoded.path.contains("active=true"));
        assert!(!encoded.path.contains("transaction"));
    }

    #[test]
    fn query_encoded_delete_carries_no_body() {
        let req = json!({"account_number": "0033322211"});
        let encoded =
            encode_request(HttpMethod::Delete, "/dedicated_account/split", Some(&req), BodyEncoding::Query)
                .unwrap();
        assert_eq!(encoded.path, "/dedicated_account/split?account_number=0033322211");
        assert!(encoded.body.is_none());
    }

    #[test]
    fn json_delete_keeps_body() {
        let req = json!({"subaccount": "ACCT_x"});
        let encoded = encode_request(HttpMethod::Delete, "/thing", Some(&req), BodyEncoding::Json).unwrap();
        assert_eq!(encoded.body.as_deref(), Some(r#"{"subaccount":"ACCT_x"}"#));
    }

    #[test]
    fn arrays_repeat_key_and_values_are_escaped() {
        let pairs = flatten_query(json!({"tag": ["a b", "c&d"]})).unwrap();
        assert_eq!(append_query("/x", &pairs), "/x?tag=a+b&tag=c%26d");
    }

    #[test]
    fn non_object_query_payload_is_rejected() {
        let err = flatten_query(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
