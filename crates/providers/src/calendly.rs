//! Calendly: scheduled events for one user.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_str, opt_u64, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "calendly";
const DEFAULT_BASE_URL: &str = "https://api.calendly.com";

/// Calendly provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "Calendly scheduling: event lookups")
        .action(
            ActionEntry::new(
                "list_scheduled_events",
                "List scheduled events for a user",
                Arc::new(ListScheduledEvents),
            )
            .args(
                ObjectSchema::new()
                    .field("user_uri", FieldKind::Str)
                    .optional("status", FieldKind::Enum(vec!["active".into(), "canceled".into()]))
                    .optional("count", FieldKind::Num),
            )
            .auth(auth_schema()),
        )
        .action(
            ActionEntry::new("get_event", "Fetch a scheduled event by uuid", Arc::new(GetEvent))
                .args(ObjectSchema::new().field("event_uuid", FieldKind::Str))
                .auth(auth_schema()),
        )
}

fn auth_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("access_token", FieldKind::Str)
        .optional("base_url", FieldKind::Str)
}

fn base_url(auth: &Value) -> String {
    opt_str(auth, "base_url")
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

struct ListScheduledEvents;

#[async_trait]
impl Handler for ListScheduledEvents {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let token = require_str(&auth, "access_token")?;
        let user_uri = require_str(&args, "user_uri")?;
        let count = opt_u64(&args, "count").unwrap_or(20);

        let mut query: Vec<(&str, String)> = vec![("user", user_uri.to_string()), ("count", count.to_string())];
        if let Some(status) = opt_str(&args, "status") {
            query.push(("status", status.to_string()));
        }

        let request = ctx
            .http
            .get(format!("{}/scheduled_events", base_url(&auth)))
            .bearer_auth(token)
            .query(&query);

        match send_json(PROVIDER, request).await {
            Ok(body) => {
                let events: Vec<Value> = body
                    .get("collection")
                    .and_then(Value::as_array)
                    .map(|list| list.iter().map(reshape_event).collect())
                    .unwrap_or_default();
                Ok(json!({"count": events.len(), "events": events}))
            }
            Err(HandlerError::Network { .. }) => {
                let status = opt_str(&args, "status");
                let events: Vec<Value> = ctx
                    .store
                    .list(PROVIDER, "events")
                    .iter()
                    .filter(|event| match status {
                        Some(status) => event.get("status").and_then(Value::as_str) == Some(status),
                        None => true,
                    })
                    .map(reshape_event)
                    .collect();
                Ok(mark_mock(json!({"count": events.len(), "events": events})))
            }
            Err(error) => Err(error),
        }
    }
}

struct GetEvent;

#[async_trait]
impl Handler for GetEvent {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let token = require_str(&auth, "access_token")?;
        let event_uuid = require_str(&args, "event_uuid")?;

        let request = ctx
            .http
            .get(format!("{}/scheduled_events/{event_uuid}", base_url(&auth)))
            .bearer_auth(token);

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_event(body.get("resource").unwrap_or(&body))),
            Err(HandlerError::Network { .. }) => {
                // Calendly identifies events by full URI; the uuid is its
                // final path segment.
                let event = ctx.store.list(PROVIDER, "events").into_iter().find(|event| {
                    event
                        .get("uri")
                        .and_then(Value::as_str)
                        .is_some_and(|uri| uri.rsplit('/').next() == Some(event_uuid))
                });
                match event {
                    Some(event) => Ok(mark_mock(reshape_event(&event))),
                    None => Err(HandlerError::Upstream {
                        provider: PROVIDER,
                        status: 404,
                        message: format!("event {event_uuid} not found in mock data"),
                    }),
                }
            }
            Err(error) => Err(error),
        }
    }
}

fn reshape_event(event: &Value) -> Value {
    json!({
        "uri": event.get("uri"),
        "name": event.get("name"),
        "status": event.get("status"),
        "start_time": event.get("start_time"),
        "end_time": event.get("end_time"),
    })
}
