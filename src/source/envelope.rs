use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DashError, DashResult};

pub const SUCCESS: &str = "success";

/// Reads `field` out of a `{status, <field>}` envelope.
///
/// A status other than `success` is an upstream failure carrying the
/// envelope's `message`/`errors`. A missing or `null` field is `Ok(None)`.
pub fn success_field<T: DeserializeOwned>(
    endpoint: &str,
    body: &Value,
    field: &str,
) -> DashResult<Option<T>> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or("");
    if status != SUCCESS {
        return Err(DashError::upstream(endpoint, error_message(body)));
    }
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| DashError::upstream(endpoint, format!("invalid `{field}` payload: {e}"))),
    }
}

pub fn required_field<T: DeserializeOwned>(
    endpoint: &str,
    body: &Value,
    field: &str,
) -> DashResult<T> {
    success_field(endpoint, body, field)?
        .ok_or_else(|| DashError::upstream(endpoint, format!("response has no `{field}`")))
}

pub fn error_message(body: &Value) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let joined = errors
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        if !joined.is_empty() {
            return joined;
        }
    }
    match body.get("status").and_then(Value::as_str) {
        Some(status) => format!("backend reported status `{status}`"),
        None => "response has no status".to_string(),
    }
}
