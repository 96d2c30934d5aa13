//! WooCommerce: store products over the WP REST API.
//!
//! WooCommerce hangs off a merchant-hosted WordPress site; the REST root is
//! `<site_url>/wp-json/wc/v3` with consumer key/secret basic auth.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_str, opt_u64, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "woocommerce";

/// WooCommerce provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "WooCommerce store: product catalog")
        .action(
            ActionEntry::new("list_products", "List products in the store", Arc::new(ListProducts))
                .args(
                    ObjectSchema::new()
                        .optional("search", FieldKind::Str)
                        .optional("per_page", FieldKind::Num),
                )
                .auth(auth_schema()),
        )
        .action(
            ActionEntry::new("get_product", "Fetch one product by id", Arc::new(GetProduct))
                .args(ObjectSchema::new().field(
                    "product_id",
                    // WooCommerce ids are numeric but arrive as either form
                    // from upstream automations.
                    FieldKind::OneOf(vec![FieldKind::Str, FieldKind::Num]),
                ))
                .auth(auth_schema()),
        )
}

fn auth_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("site_url", FieldKind::Str)
        .field("consumer_key", FieldKind::Str)
        .field("consumer_secret", FieldKind::Str)
}

fn api_root(auth: &Value) -> Result<String, HandlerError> {
    let site_url = require_str(auth, "site_url")?;
    Ok(format!("{}/wp-json/wc/v3", site_url.trim_end_matches('/')))
}

fn credentials(auth: &Value) -> Result<(String, String), HandlerError> {
    Ok((
        require_str(auth, "consumer_key")?.to_string(),
        require_str(auth, "consumer_secret")?.to_string(),
    ))
}

/// Accept the union form of `product_id` and normalize to a path segment.
fn product_id_segment(args: &Value) -> Result<String, HandlerError> {
    match args.get("product_id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(HandlerError::Internal("validated payload is missing field 'product_id'".to_string())),
    }
}

struct ListProducts;

#[async_trait]
impl Handler for ListProducts {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let (key, secret) = credentials(&auth)?;
        let per_page = opt_u64(&args, "per_page").unwrap_or(10);

        let mut query: Vec<(&str, String)> = vec![("per_page", per_page.to_string())];
        if let Some(search) = opt_str(&args, "search") {
            query.push(("search", search.to_string()));
        }

        let request = ctx
            .http
            .get(format!("{}/products", api_root(&auth)?))
            .basic_auth(key, Some(secret))
            .query(&query);

        match send_json(PROVIDER, request).await {
            Ok(body) => {
                let products: Vec<Value> = body
                    .as_array()
                    .map(|list| list.iter().map(reshape_product).collect())
                    .unwrap_or_default();
                Ok(json!({"count": products.len(), "products": products}))
            }
            Err(HandlerError::Network { .. }) => {
                let products: Vec<Value> = ctx
                    .store
                    .list(PROVIDER, "products")
                    .iter()
                    .map(reshape_product)
                    .collect();
                Ok(mark_mock(json!({"count": products.len(), "products": products})))
            }
            Err(error) => Err(error),
        }
    }
}

struct GetProduct;

#[async_trait]
impl Handler for GetProduct {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let (key, secret) = credentials(&auth)?;
        let product_id = product_id_segment(&args)?;

        let request = ctx
            .http
            .get(format!("{}/products/{product_id}", api_root(&auth)?))
            .basic_auth(key, Some(secret));

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_product(&body)),
            Err(HandlerError::Network { .. }) => {
                let product = ctx
                    .store
                    .list(PROVIDER, "products")
                    .into_iter()
                    .find(|product| product.get("id").map(Value::to_string).as_deref() == Some(&product_id));
                match product {
                    Some(product) => Ok(mark_mock(reshape_product(&product))),
                    None => Err(HandlerError::Upstream {
                        provider: PROVIDER,
                        status: 404,
                        message: format!("product {product_id} not found in mock data"),
                    }),
                }
            }
            Err(error) => Err(error),
        }
    }
}

fn reshape_product(product: &Value) -> Value {
    json!({
        "id": product.get("id"),
        "name": product.get("name"),
        "sku": product.get("sku"),
        "price": product.get("price"),
        "stock_status": product.get("stock_status"),
    })
}
