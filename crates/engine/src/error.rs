//! Error taxonomy for handler execution.

use thiserror::Error;

/// Failures a handler can surface to dispatch.
///
/// `Upstream` and `Network` are *handled* failures: dispatch serializes them
/// into the error envelope with a `200` status. `Internal` is reserved for
/// faults inside the gateway itself and maps to `500`.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} returned HTTP {status}: {message}")]
    Upstream {
        /// Provider identifier, e.g. `stripe`.
        provider: &'static str,
        /// HTTP status received from the provider.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("network error calling {provider}: {message}")]
    Network {
        /// Provider identifier.
        provider: &'static str,
        /// Underlying client error.
        message: String,
    },

    /// The provider answered 2xx but the body was not usable JSON.
    #[error("unparseable response from {provider}: {message}")]
    BadResponse {
        /// Provider identifier.
        provider: &'static str,
        /// Parse failure detail.
        message: String,
    },

    /// Gateway-side fault: inconsistent registration, poisoned state, or a
    /// field that validation should have guaranteed.
    #[error("internal handler fault: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Upstream HTTP status when the failure carries one.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether dispatch should treat this as a handled failure (`200` with
    /// an error envelope) rather than an internal error (`500`).
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
