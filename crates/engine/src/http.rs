//! Single-attempt outbound request execution.
//!
//! Every handler funnels its one REST call through [`send_json`]: build a
//! `reqwest::RequestBuilder`, send it once, map the outcome onto
//! [`HandlerError`]. There is no retry, no backoff, and no per-request
//! timeout override.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::HandlerError;

const BODY_SUMMARY_MAX: usize = 300;

/// Send a prepared request once and parse the response body as JSON.
///
/// - A transport failure maps to [`HandlerError::Network`] so the caller can
///   decide to fall back to mock data.
/// - A non-2xx status maps to [`HandlerError::Upstream`] with a truncated
///   body excerpt.
/// - An empty 2xx body parses as `null`; any other unparseable 2xx body maps
///   to [`HandlerError::BadResponse`].
pub async fn send_json(provider: &'static str, builder: reqwest::RequestBuilder) -> Result<Value, HandlerError> {
    let response = builder.send().await.map_err(|error| {
        warn!(provider, error = %error, "outbound request failed before a response");
        HandlerError::Network {
            provider,
            message: error.to_string(),
        }
    })?;

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    debug!(provider, status = status.as_u16(), bytes = text.len(), "provider responded");

    if !status.is_success() {
        return Err(HandlerError::Upstream {
            provider,
            status: status.as_u16(),
            message: truncate(&text, BODY_SUMMARY_MAX),
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|error| HandlerError::BadResponse {
        provider,
        message: error.to_string(),
    })
}

fn truncate(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_len {
        return trimmed.to_string();
    }
    let kept: String = trimmed.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{address}")
    }

    #[tokio::test]
    async fn parses_successful_json_response() {
        let base = serve(Router::new().route("/ok", get(|| async { r#"{"id": 7}"# }))).await;
        let client = reqwest::Client::new();
        let value = send_json("stub", client.get(format!("{base}/ok"))).await.unwrap();
        assert_eq!(value["id"], 7);
    }

    #[tokio::test]
    async fn empty_success_body_becomes_null() {
        let base = serve(Router::new().route("/empty", get(|| async { "" }))).await;
        let client = reqwest::Client::new();
        let value = send_json("stub", client.get(format!("{base}/empty"))).await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_upstream_error() {
        let base = serve(Router::new().route(
            "/teapot",
            get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
        ))
        .await;
        let client = reqwest::Client::new();
        let error = send_json("stub", client.get(format!("{base}/teapot"))).await.unwrap_err();
        match error {
            HandlerError::Upstream { status, message, .. } => {
                assert_eq!(status, 418);
                assert_eq!(message, "short and stout");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        let client = reqwest::Client::new();
        // Port 1 on loopback is never listening.
        let error = send_json("stub", client.get("http://127.0.0.1:1/")).await.unwrap_err();
        assert!(matches!(error, HandlerError::Network { .. }));
    }

    #[test]
    fn truncate_appends_ellipsis_past_limit() {
        let long = "x".repeat(400);
        let summary = truncate(&long, 300);
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 300);
    }
}
