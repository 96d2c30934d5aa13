//! Shopify: Admin REST orders, scoped to one store.
//!
//! Shopify's Admin API lives under the merchant's own domain and
//! authenticates with the `X-Shopify-Access-Token` header.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_str, opt_u64, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "shopify";
const API_VERSION: &str = "2024-10";
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Shopify provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "Shopify Admin API: store orders")
        .action(
            ActionEntry::new("list_orders", "List the store's orders", Arc::new(ListOrders))
                .args(
                    ObjectSchema::new()
                        .optional(
                            "status",
                            FieldKind::Enum(vec!["open".into(), "closed".into(), "cancelled".into(), "any".into()]),
                        )
                        .optional("limit", FieldKind::Num),
                )
                .auth(auth_schema()),
        )
        .action(
            ActionEntry::new("get_order", "Fetch a single order by id", Arc::new(GetOrder))
                .args(ObjectSchema::new().field("order_id", FieldKind::Str))
                .auth(auth_schema()),
        )
}

fn auth_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("shop_domain", FieldKind::Str)
        .field("access_token", FieldKind::Str)
        .optional("base_url", FieldKind::Str)
}

/// Admin API base: explicit override, or derived from the shop domain.
fn base_url(auth: &Value) -> Result<String, HandlerError> {
    if let Some(base) = opt_str(auth, "base_url") {
        return Ok(base.trim_end_matches('/').to_string());
    }
    let shop_domain = require_str(auth, "shop_domain")?;
    Ok(format!("https://{shop_domain}/admin/api/{API_VERSION}"))
}

struct ListOrders;

#[async_trait]
impl Handler for ListOrders {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let token = require_str(&auth, "access_token")?;
        let status = opt_str(&args, "status").unwrap_or("any");
        let limit = opt_u64(&args, "limit").unwrap_or(50);

        let request = ctx
            .http
            .get(format!("{}/orders.json", base_url(&auth)?))
            .header(ACCESS_TOKEN_HEADER, token)
            .query(&[("status", status.to_string()), ("limit", limit.to_string())]);

        match send_json(PROVIDER, request).await {
            Ok(body) => {
                let orders: Vec<Value> = body
                    .get("orders")
                    .and_then(Value::as_array)
                    .map(|list| list.iter().map(reshape_order).collect())
                    .unwrap_or_default();
                Ok(json!({"count": orders.len(), "orders": orders}))
            }
            Err(HandlerError::Network { .. }) => {
                let orders: Vec<Value> = ctx
                    .store
                    .list(PROVIDER, "orders")
                    .iter()
                    .map(reshape_order)
                    .collect();
                Ok(mark_mock(json!({"count": orders.len(), "orders": orders})))
            }
            Err(error) => Err(error),
        }
    }
}

struct GetOrder;

#[async_trait]
impl Handler for GetOrder {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let token = require_str(&auth, "access_token")?;
        let order_id = require_str(&args, "order_id")?;

        let request = ctx
            .http
            .get(format!("{}/orders/{order_id}.json", base_url(&auth)?))
            .header(ACCESS_TOKEN_HEADER, token);

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_order(body.get("order").unwrap_or(&body))),
            Err(HandlerError::Network { .. }) => {
                let order = ctx
                    .store
                    .list(PROVIDER, "orders")
                    .into_iter()
                    .find(|order| order.get("id").map(Value::to_string).as_deref() == Some(order_id));
                match order {
                    Some(order) => Ok(mark_mock(reshape_order(&order))),
                    None => Err(HandlerError::Upstream {
                        provider: PROVIDER,
                        status: 404,
                        message: format!("order {order_id} not found in mock data"),
                    }),
                }
            }
            Err(error) => Err(error),
        }
    }
}

fn reshape_order(order: &Value) -> Value {
    json!({
        "id": order.get("id"),
        "name": order.get("name"),
        "email": order.get("email"),
        "financial_status": order.get("financial_status"),
        "total_price": order.get("total_price"),
        "currency": order.get("currency"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use switchboard_engine::MockStore;
    use switchboard_registry::describe_schema;

    #[test]
    fn status_enum_labels_all_literals() {
        let entry = provider();
        let list = entry.actions.iter().find(|a| a.name == "list_orders").unwrap();
        let shape = describe_schema(list.args_schema.as_ref().unwrap());
        assert_eq!(shape["status"], "Optional<Enum<[open, closed, cancelled, any]>>");
    }

    #[test]
    fn base_url_is_derived_from_shop_domain() {
        let auth = json!({"shop_domain": "demo.myshopify.com", "access_token": "x"});
        assert_eq!(
            base_url(&auth).unwrap(),
            format!("https://demo.myshopify.com/admin/api/{API_VERSION}")
        );
        let auth = json!({"shop_domain": "demo.myshopify.com", "access_token": "x", "base_url": "http://127.0.0.1:9/"});
        assert_eq!(base_url(&auth).unwrap(), "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn list_orders_reshapes_each_order() {
        let router = Router::new().route(
            "/orders.json",
            get(|| async {
                axum::Json(json!({"orders": [
                    {"id": 1, "name": "#1", "email": "a@b.c", "financial_status": "paid",
                     "total_price": "10.00", "currency": "USD", "line_items": []}
                ]}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let ctx = HandlerContext::new(Arc::new(MockStore::seeded()));
        let auth = json!({"shop_domain": "demo.myshopify.com", "access_token": "shpat_x", "base_url": base});
        let result = ListOrders.call(&ctx, json!({"status": "open"}), auth).await.unwrap();
        assert_eq!(result["count"], 1);
        assert!(result["orders"][0].get("line_items").is_none());
    }

    #[tokio::test]
    async fn list_orders_serves_seeded_data_offline() {
        let ctx = HandlerContext::new(Arc::new(MockStore::seeded()));
        let auth = json!({"shop_domain": "demo.myshopify.com", "access_token": "shpat_x", "base_url": "http://127.0.0.1:1"});
        let result = ListOrders.call(&ctx, json!({}), auth).await.unwrap();
        assert_eq!(result["mock"], true);
        assert_eq!(result["orders"][0]["name"], "#1001");
    }
}
