//! The uniform response envelope returned by every dispatch call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error half of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeError {
    /// Human-readable failure description.
    pub message: String,
    /// HTTP status returned by the upstream provider, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<u16>,
}

/// Uniform success/error body: `{"success": true, "data": ...}` or
/// `{"success": false, "error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the action produced a usable result.
    pub success: bool,
    /// Reshaped provider response on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure details when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

impl Envelope {
    /// Successful result wrapping the reshaped data.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure without an upstream status (validation, routing, internal).
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                message: message.into(),
                provider_status: None,
            }),
        }
    }

    /// Failure reported by the upstream provider with its HTTP status.
    pub fn upstream_err(message: impl Into<String>, provider_status: u16) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                message: message.into(),
                provider_status: Some(provider_status),
            }),
        }
    }
}
