//! Field extraction helpers for validated `args`/`auth` JSON.
//!
//! Dispatch validates payloads against the registered schemas before a
//! handler runs, so a missing required field here is a gateway bug, not a
//! client error — it surfaces as [`HandlerError::Internal`].

use serde_json::Value;

use crate::error::HandlerError;

/// Pull a required string field out of a validated payload.
pub fn require_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str, HandlerError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::Internal(format!("validated payload is missing string field '{field}'")))
}

/// Optional string field; absent and `null` both yield `None`.
pub fn opt_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload.get(field).and_then(Value::as_str)
}

/// Optional unsigned integer field.
pub fn opt_u64(payload: &Value, field: &str) -> Option<u64> {
    payload.get(field).and_then(Value::as_u64)
}

/// Optional boolean field.
pub fn opt_bool(payload: &Value, field: &str) -> Option<bool> {
    payload.get(field).and_then(Value::as_bool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_str_returns_present_value() {
        let payload = json!({"email": "a@b.c"});
        assert_eq!(require_str(&payload, "email").unwrap(), "a@b.c");
    }

    #[test]
    fn require_str_flags_missing_field_as_internal() {
        let payload = json!({});
        assert!(matches!(require_str(&payload, "email"), Err(HandlerError::Internal(_))));
    }

    #[test]
    fn optional_extractors_tolerate_absence_and_null() {
        let payload = json!({"phone": null, "limit": 25, "flag": true});
        assert_eq!(opt_str(&payload, "phone"), None);
        assert_eq!(opt_str(&payload, "missing"), None);
        assert_eq!(opt_u64(&payload, "limit"), Some(25));
        assert_eq!(opt_bool(&payload, "flag"), Some(true));
    }
}
