//! Klaviyo: profiles and event tracking (JSON:API surface).
//!
//! Klaviyo authenticates with `Authorization: Klaviyo-API-Key <key>` and
//! requires a `revision` header selecting the API vintage.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_str, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "klaviyo";
const DEFAULT_BASE_URL: &str = "https://a.klaviyo.com/api";
const REVISION: &str = "2024-10-15";

/// Klaviyo provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "Klaviyo marketing: profiles and events")
        .action(
            ActionEntry::new("create_profile", "Create a marketing profile", Arc::new(CreateProfile))
                .args(
                    ObjectSchema::new()
                        .field("email", FieldKind::Str)
                        .optional("first_name", FieldKind::Str)
                        .optional("last_name", FieldKind::Str)
                        // Klaviyo accepts an explicit null to clear the number.
                        .optional("phone_number", FieldKind::Nullable(Box::new(FieldKind::Str))),
                )
                .auth(auth_schema()),
        )
        .action(
            ActionEntry::new("track_event", "Record a metric event for a profile", Arc::new(TrackEvent))
                .args(
                    ObjectSchema::new()
                        .field("metric_name", FieldKind::Str)
                        .field("email", FieldKind::Str)
                        .optional("properties", FieldKind::Obj(ObjectSchema::new()))
                        .optional("value", FieldKind::Num)
                        .optional("time", FieldKind::Str),
                )
                .auth(auth_schema()),
        )
}

fn auth_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("api_key", FieldKind::Str)
        .optional("base_url", FieldKind::Str)
}

fn base_url(auth: &Value) -> String {
    opt_str(auth, "base_url")
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

fn authorization(auth: &Value) -> Result<String, HandlerError> {
    Ok(format!("Klaviyo-API-Key {}", require_str(auth, "api_key")?))
}

struct CreateProfile;

#[async_trait]
impl Handler for CreateProfile {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let email = require_str(&args, "email")?;

        let mut attributes = json!({"email": email});
        if let Some(first_name) = opt_str(&args, "first_name") {
            attributes["first_name"] = json!(first_name);
        }
        if let Some(last_name) = opt_str(&args, "last_name") {
            attributes["last_name"] = json!(last_name);
        }
        if let Some(phone_number) = args.get("phone_number") {
            attributes["phone_number"] = phone_number.clone();
        }

        let request = ctx
            .http
            .post(format!("{}/profiles", base_url(&auth)))
            .header("Authorization", authorization(&auth)?)
            .header("revision", REVISION)
            .json(&json!({"data": {"type": "profile", "attributes": attributes}}));

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_profile(body.get("data").unwrap_or(&body))),
            Err(HandlerError::Network { .. }) => {
                let record = json!({
                    "id": format!("01HMOCK{:05}", ctx.store.list(PROVIDER, "profiles").len() + 1),
                    "email": email,
                    "first_name": opt_str(&args, "first_name"),
                    "last_name": opt_str(&args, "last_name")
                });
                ctx.store.insert(PROVIDER, "profiles", record.clone());
                Ok(mark_mock(reshape_stored_profile(&record)))
            }
            Err(error) => Err(error),
        }
    }
}

struct TrackEvent;

#[async_trait]
impl Handler for TrackEvent {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let metric_name = require_str(&args, "metric_name")?;
        let email = require_str(&args, "email")?;

        let mut attributes = json!({
            "properties": args.get("properties").cloned().unwrap_or_else(|| json!({})),
            "metric": {"data": {"type": "metric", "attributes": {"name": metric_name}}},
            "profile": {"data": {"type": "profile", "attributes": {"email": email}}}
        });
        if let Some(value) = args.get("value") {
            attributes["value"] = value.clone();
        }
        if let Some(time) = opt_str(&args, "time") {
            attributes["time"] = json!(time);
        }

        let request = ctx
            .http
            .post(format!("{}/events", base_url(&auth)))
            .header("Authorization", authorization(&auth)?)
            .header("revision", REVISION)
            .json(&json!({"data": {"type": "event", "attributes": attributes}}));

        match send_json(PROVIDER, request).await {
            // The events endpoint answers 202 with an empty body.
            Ok(_) => Ok(json!({"accepted": true, "metric": metric_name, "email": email})),
            Err(HandlerError::Network { .. }) => {
                ctx.store.insert(
                    PROVIDER,
                    "events",
                    json!({"metric": metric_name, "email": email, "properties": args.get("properties")}),
                );
                Ok(mark_mock(json!({"accepted": true, "metric": metric_name, "email": email})))
            }
            Err(error) => Err(error),
        }
    }
}

/// Live responses nest fields under `attributes` (JSON:API).
fn reshape_profile(data: &Value) -> Value {
    let attributes = data.get("attributes").cloned().unwrap_or_else(|| json!({}));
    json!({
        "id": data.get("id"),
        "email": attributes.get("email"),
        "first_name": attributes.get("first_name"),
        "last_name": attributes.get("last_name"),
    })
}

fn reshape_stored_profile(record: &Value) -> Value {
    json!({
        "id": record.get("id"),
        "email": record.get("email"),
        "first_name": record.get("first_name"),
        "last_name": record.get("last_name"),
    })
}
