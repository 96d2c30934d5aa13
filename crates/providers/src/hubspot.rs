//! HubSpot: CRM v3 contacts.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_str, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "hubspot";
const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// HubSpot provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "HubSpot CRM: contact management")
        .action(
            ActionEntry::new("create_contact", "Create a CRM contact", Arc::new(CreateContact))
                .args(
                    ObjectSchema::new()
                        .field("email", FieldKind::Str)
                        .optional("first_name", FieldKind::Str)
                        .optional("last_name", FieldKind::Str),
                )
                .auth(auth_schema()),
        )
        .action(
            ActionEntry::new(
                "get_contact_by_email",
                "Search CRM contacts by email address",
                Arc::new(GetContactByEmail),
            )
            .args(ObjectSchema::new().field("email", FieldKind::Str))
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

struct CreateContact;

#[async_trait]
impl Handler for CreateContact {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let token = require_str(&auth, "access_token")?;
        let email = require_str(&args, "email")?;

        let mut properties = json!({"email": email});
        if let Some(first_name) = opt_str(&args, "first_name") {
            properties["firstname"] = json!(first_name);
        }
        if let Some(last_name) = opt_str(&args, "last_name") {
            properties["lastname"] = json!(last_name);
        }

        debug!(provider = PROVIDER, email, "creating contact");
        let request = ctx
            .http
            .post(format!("{}/crm/v3/objects/contacts", base_url(&auth)))
            .bearer_auth(token)
            .json(&json!({"properties": properties}));

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_contact(&body)),
            Err(HandlerError::Network { .. }) => {
                let record = json!({
                    "id": format!("{}", 500 + ctx.store.list(PROVIDER, "contacts").len() + 1),
                    "email": email,
                    "firstname": opt_str(&args, "first_name"),
                    "lastname": opt_str(&args, "last_name")
                });
                ctx.store.insert(PROVIDER, "contacts", record.clone());
                Ok(mark_mock(reshape_stored_contact(&record)))
            }
            Err(error) => Err(error),
        }
    }
}

struct GetContactByEmail;

#[async_trait]
impl Handler for GetContactByEmail {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let token = require_str(&auth, "access_token")?;
        let email = require_str(&args, "email")?;

        let body = json!({
            "filterGroups": [{
                "filters": [{"propertyName": "email", "operator": "EQ", "value": email}]
            }],
            "limit": 1
        });
        let request = ctx
            .http
            .post(format!("{}/crm/v3/objects/contacts/search", base_url(&auth)))
            .bearer_auth(token)
            .json(&body);

        match send_json(PROVIDER, request).await {
            Ok(body) => {
                let first = body.get("results").and_then(Value::as_array).and_then(|list| list.first());
                Ok(match first {
                    Some(contact) => json!({"found": true, "contact": reshape_contact(contact)}),
                    None => json!({"found": false, "contact": null}),
                })
            }
            Err(HandlerError::Network { .. }) => Ok(mark_mock(match ctx.store.find(PROVIDER, "contacts", "email", email) {
                Some(contact) => json!({"found": true, "contact": reshape_stored_contact(&contact)}),
                None => json!({"found": false, "contact": null}),
            })),
            Err(error) => Err(error),
        }
    }
}

/// HubSpot nests contact fields under `properties`; flatten the ones we keep.
fn reshape_contact(body: &Value) -> Value {
    let properties = body.get("properties").cloned().unwrap_or_else(|| json!({}));
    json!({
        "id": body.get("id"),
        "email": properties.get("email"),
        "first_name": properties.get("firstname"),
        "last_name": properties.get("lastname"),
    })
}

/// Mock-store records are already flat.
fn reshape_stored_contact(record: &Value) -> Value {
    json!({
        "id": record.get("id"),
        "email": record.get("email"),
        "first_name": record.get("firstname"),
        "last_name": record.get("lastname"),
    })
}
