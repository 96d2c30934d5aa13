//! Stripe: customers and invoices.
//!
//! Stripe's v1 API takes form-encoded bodies and a bearer secret key.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_bool, opt_str, opt_u64, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "stripe";
const DEFAULT_BASE_URL: &str = "https://api.stripe.com/v1";

/// Stripe provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "Stripe payments: customers and invoices")
        .action(
            ActionEntry::new("create_customer", "Create a customer record", Arc::new(CreateCustomer))
                .args(
                    ObjectSchema::new()
                        .field("email", FieldKind::Str)
                        .optional("name", FieldKind::Str)
                        .optional("description", FieldKind::Str),
                )
                .auth(auth_schema()),
        )
        .action(
            ActionEntry::new(
                "get_customer_by_email",
                "Look up the customer matching an email address",
                Arc::new(GetCustomerByEmail),
            )
            .args(
                ObjectSchema::new()
                    .field("email", FieldKind::Str)
                    .optional("limit", FieldKind::Num),
            )
            .auth(auth_schema()),
        )
        .action(
            ActionEntry::new("create_invoice", "Create a draft invoice for a customer", Arc::new(CreateInvoice))
                .args(
                    ObjectSchema::new()
                        .field("customer_id", FieldKind::Str)
                        .optional("days_until_due", FieldKind::Num)
                        .optional("auto_advance", FieldKind::Bool)
                        .optional(
                            "collection_method",
                            FieldKind::Enum(vec!["charge_automatically".into(), "send_invoice".into()]),
                        ),
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

struct CreateCustomer;

#[async_trait]
impl Handler for CreateCustomer {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let api_key = require_str(&auth, "api_key")?;
        let email = require_str(&args, "email")?;

        let mut form: Vec<(&str, String)> = vec![("email", email.to_string())];
        if let Some(name) = opt_str(&args, "name") {
            form.push(("name", name.to_string()));
        }
        if let Some(description) = opt_str(&args, "description") {
            form.push(("description", description.to_string()));
        }

        debug!(provider = PROVIDER, email, "creating customer");
        let request = ctx
            .http
            .post(format!("{}/customers", base_url(&auth)))
            .bearer_auth(api_key)
            .form(&form);

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_customer(&body)),
            Err(HandlerError::Network { .. }) => {
                let record = json!({
                    "id": format!("cus_mock_{}", ctx.store.list(PROVIDER, "customers").len() + 1),
                    "email": email,
                    "name": opt_str(&args, "name"),
                    "created": 0
                });
                ctx.store.insert(PROVIDER, "customers", record.clone());
                Ok(mark_mock(reshape_customer(&record)))
            }
            Err(error) => Err(error),
        }
    }
}

struct GetCustomerByEmail;

#[async_trait]
impl Handler for GetCustomerByEmail {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let api_key = require_str(&auth, "api_key")?;
        let email = require_str(&args, "email")?;
        let limit = opt_u64(&args, "limit").unwrap_or(1);

        let request = ctx
            .http
            .get(format!("{}/customers", base_url(&auth)))
            .bearer_auth(api_key)
            .query(&[("email", email.to_string()), ("limit", limit.to_string())]);

        match send_json(PROVIDER, request).await {
            Ok(body) => {
                let first = body.get("data").and_then(Value::as_array).and_then(|list| list.first());
                Ok(match first {
                    Some(customer) => json!({"found": true, "customer": reshape_customer(customer)}),
                    None => json!({"found": false, "customer": null}),
                })
            }
            Err(HandlerError::Network { .. }) => Ok(mark_mock(match ctx.store.find(PROVIDER, "customers", "email", email) {
                Some(customer) => json!({"found": true, "customer": reshape_customer(&customer)}),
                None => json!({"found": false, "customer": null}),
            })),
            Err(error) => Err(error),
        }
    }
}

struct CreateInvoice;

#[async_trait]
impl Handler for CreateInvoice {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let api_key = require_str(&auth, "api_key")?;
        let customer_id = require_str(&args, "customer_id")?;

        let mut form: Vec<(&str, String)> = vec![("customer", customer_id.to_string())];
        if let Some(days) = opt_u64(&args, "days_until_due") {
            form.push(("days_until_due", days.to_string()));
        }
        if let Some(auto_advance) = opt_bool(&args, "auto_advance") {
            form.push(("auto_advance", auto_advance.to_string()));
        }
        if let Some(method) = opt_str(&args, "collection_method") {
            form.push(("collection_method", method.to_string()));
        }

        let request = ctx
            .http
            .post(format!("{}/invoices", base_url(&auth)))
            .bearer_auth(api_key)
            .form(&form);

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_invoice(&body)),
            Err(HandlerError::Network { .. }) => {
                let record = json!({
                    "id": format!("in_mock_{}", ctx.store.list(PROVIDER, "invoices").len() + 1),
                    "customer": customer_id,
                    "status": "draft",
                    "amount_due": 0
                });
                ctx.store.insert(PROVIDER, "invoices", record.clone());
                Ok(mark_mock(reshape_invoice(&record)))
            }
            Err(error) => Err(error),
        }
    }
}

fn reshape_customer(body: &Value) -> Value {
    json!({
        "id": body.get("id"),
        "email": body.get("email"),
        "name": body.get("name"),
        "created": body.get("created"),
    })
}

fn reshape_invoice(body: &Value) -> Value {
    json!({
        "id": body.get("id"),
        "customer": body.get("customer"),
        "status": body.get("status"),
        "amount_due": body.get("amount_due"),
    })
}
