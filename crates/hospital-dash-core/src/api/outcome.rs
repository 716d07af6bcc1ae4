//! Uniform result of a write request.

use serde_json::Value;

use crate::models::RecordId;

const UNKNOWN_FAILURE: &str = "Unknown error";

/// Result of a well-formed write response.
///
/// Transport problems are an `ApiError`; this type only describes what the
/// backend said about the write itself.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome<T> {
    /// The backend accepted the write
    Ok(T),
    /// The backend refused it, with its message
    Rejected(String),
}

impl<T> WriteOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteOutcome::Ok(_))
    }

    /// Rejection message, if any.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            WriteOutcome::Ok(_) => None,
            WriteOutcome::Rejected(message) => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WriteOutcome<U> {
        match self {
            WriteOutcome::Ok(value) => WriteOutcome::Ok(f(value)),
            WriteOutcome::Rejected(message) => WriteOutcome::Rejected(message),
        }
    }
}

impl WriteOutcome<RecordId> {
    /// Decode a create response: success carries a generated `id`.
    pub fn from_create_response(body: &Value) -> Self {
        match body.get("id").and_then(id_value) {
            Some(id) => WriteOutcome::Ok(id),
            None => WriteOutcome::Rejected(message_of(body)),
        }
    }
}

impl WriteOutcome<()> {
    /// Decode an update response: success is `{"success": true}`.
    pub fn from_update_response(body: &Value) -> Self {
        match body.get("success").and_then(Value::as_bool) {
            Some(true) => WriteOutcome::Ok(()),
            _ => WriteOutcome::Rejected(message_of(body)),
        }
    }
}

fn id_value(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn message_of(body: &Value) -> String {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(UNKNOWN_FAILURE)
        .to_string()
}
