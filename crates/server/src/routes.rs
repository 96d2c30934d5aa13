//! Gateway routes: discovery and dispatch.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use switchboard_engine::HandlerContext;
use switchboard_registry::{HandlerRegistry, build_catalog};
use switchboard_types::{Envelope, FieldKind, validate_object};
use switchboard_util::{redact_json, redact_sensitive};

/// Header carrying the shared internal secret.
pub const API_KEY_HEADER: &str = "x-internal-api-key";

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    /// Registered providers and actions.
    pub registry: Arc<HandlerRegistry>,
    /// Dispatch context handed to handlers.
    pub ctx: HandlerContext,
    /// Expected `x-internal-api-key` value.
    pub api_key: Arc<str>,
}

impl AppState {
    /// Assemble the state dispatch and discovery share.
    pub fn new(registry: HandlerRegistry, ctx: HandlerContext, api_key: &str) -> Self {
        Self {
            registry: Arc::new(registry),
            ctx,
            api_key: Arc::from(api_key),
        }
    }
}

/// Build the gateway router.
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/discover", get(discover))
        .route("/mcp/{provider}/{action}", post(dispatch))
        .with_state(state)
}

/// `GET /discover`: the full provider catalog, unauthenticated.
async fn discover(State(state): State<AppState>) -> Response {
    let catalog = build_catalog(&state.registry);
    match serde_json::to_value(&catalog) {
        Ok(providers) => (StatusCode::OK, Json(json!({"providers": providers}))).into_response(),
        Err(error) => {
            warn!(%error, "discovery serialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to generate discovery data."})),
            )
                .into_response()
        }
    }
}

/// `POST /mcp/{provider}/{action}`: validate, invoke, wrap in the envelope.
async fn dispatch(
    State(state): State<AppState>,
    Path((provider, action)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let presented = headers.get(API_KEY_HEADER).and_then(|value| value.to_str().ok());
    if presented != Some(state.api_key.as_ref()) {
        return reply(
            StatusCode::UNAUTHORIZED,
            Envelope::err("missing or invalid x-internal-api-key header"),
        );
    }

    let Some(args) = body.get("args").filter(|value| value.is_object()).cloned() else {
        return reply(StatusCode::BAD_REQUEST, Envelope::err("body must include an 'args' object"));
    };
    let Some(auth) = body.get("auth").filter(|value| value.is_object()).cloned() else {
        return reply(StatusCode::BAD_REQUEST, Envelope::err("body must include an 'auth' object"));
    };

    let Some(entry) = state.registry.find(&provider, &action) else {
        return reply(
            StatusCode::NOT_FOUND,
            Envelope::err(format!("unknown action {provider}/{action}")),
        );
    };

    if let Some(FieldKind::Obj(schema)) = &entry.args_schema {
        if let Err(error) = validate_object(schema, &args) {
            return reply(StatusCode::BAD_REQUEST, Envelope::err(format!("invalid args: {error}")));
        }
    }
    if let Some(FieldKind::Obj(schema)) = &entry.auth_schema {
        if let Err(error) = validate_object(schema, &auth) {
            return reply(StatusCode::BAD_REQUEST, Envelope::err(format!("invalid auth: {error}")));
        }
    }

    debug!(provider, action, args = %redact_json(&args), "dispatching");
    match entry.handler.call(&state.ctx, args, auth).await {
        Ok(data) => {
            info!(provider, action, outcome = "ok", "dispatched");
            reply(StatusCode::OK, Envelope::ok(data))
        }
        Err(error) if error.is_handled() => {
            let message = redact_sensitive(&error.to_string());
            warn!(provider, action, outcome = "handled", %message, "dispatched");
            let envelope = match error.provider_status() {
                Some(status) => Envelope::upstream_err(message, status),
                None => Envelope::err(message),
            };
            reply(StatusCode::OK, envelope)
        }
        Err(error) => {
            let message = redact_sensitive(&error.to_string());
            warn!(provider, action, outcome = "internal", %message, "dispatched");
            reply(StatusCode::INTERNAL_SERVER_ERROR, Envelope::err(message))
        }
    }
}

fn reply(status: StatusCode, envelope: Envelope) -> Response {
    (status, Json(envelope)).into_response()
}
