//! Uniform result shape for every API call.
//!
//! The service answers with JSON objects on success, but error responses may
//! carry JSON, a bare number, plain text, or nothing at all. Both paths are
//! normalized into [`ApiResponse`] here:
//!
//! - Success bodies are parsed as JSON. Anything that fails to parse, or
//!   parses to an empty/falsy value, becomes an empty JSON object.
//! - Error bodies are kept as raw text unless they are valid JSON and not a
//!   bare number, in which case they are parsed.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Result;

/// Response body after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// A parsed JSON value.
    Json(Value),
    /// Raw response text that was not (or deliberately not) parsed.
    ///
    /// Valid UTF-8 is kept byte for byte. A body that is not valid UTF-8 is
    /// decoded lossily, with each invalid sequence replaced by U+FFFD.
    Text(String),
}

impl ResponseBody {
    /// Normalizes the body of a successful (non-4xx/5xx) response.
    pub(crate) fn from_success(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) if !is_falsy_json(&value) => ResponseBody::Json(value),
            _ => ResponseBody::empty(),
        }
    }

    /// Normalizes the body of a 4xx/5xx response without discarding it.
    pub(crate) fn from_error(raw: String) -> Self {
        if is_numeric(&raw) {
            return ResponseBody::Text(raw);
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) if is_falsy_json(&value) => ResponseBody::empty(),
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw),
        }
    }

    /// An empty JSON object.
    pub fn empty() -> Self {
        ResponseBody::Json(Value::Object(Map::new()))
    }

    /// The parsed JSON value, if the body was parsed.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// The raw text, if the body was kept unparsed.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(text) => Some(text),
        }
    }
}

/// Result of a single API call: the HTTP status and the normalized body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// HTTP status code returned by the service.
    pub status: u16,
    /// Normalized response body.
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Shorthand for `self.body.as_json()`.
    pub fn json(&self) -> Option<&Value> {
        self.body.as_json()
    }

    /// Shorthand for `self.body.as_text()`.
    pub fn text(&self) -> Option<&str> {
        self.body.as_text()
    }

    /// Deserializes the body into a caller-defined type.
    ///
    /// # Errors
    ///
    /// - `A11yError::Parse` — the body does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let value = match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone())?,
            ResponseBody::Text(text) => serde_json::from_str(text)?,
        };
        Ok(value)
    }
}

/// Decodes a response body as UTF-8, falling back to a lossy decode only
/// when the bytes are not valid UTF-8.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Values that collapse to an empty object after decoding.
fn is_falsy_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Decimal number check: optional surrounding whitespace, optional sign,
/// digits with an optional fraction, optional exponent. No hex, no `inf`.
fn is_numeric(raw: &str) -> bool {
    let s = raw.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
