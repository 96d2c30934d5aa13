//! WordPress: posts over the core REST API.
//!
//! Authenticates with a username plus application password (basic auth);
//! the REST root is `<site_url>/wp-json/wp/v2`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use switchboard_engine::{Handler, HandlerContext, HandlerError, mark_mock, opt_str, opt_u64, require_str, send_json};
use switchboard_registry::{ActionEntry, ProviderEntry};
use switchboard_types::{FieldKind, ObjectSchema};

const PROVIDER: &str = "wordpress";

/// WordPress provider entry with its actions and schemas.
pub fn provider() -> ProviderEntry {
    ProviderEntry::new(PROVIDER, "WordPress site: post publishing")
        .action(
            ActionEntry::new("create_post", "Create a post on the site", Arc::new(CreatePost))
                .args(
                    ObjectSchema::new()
                        .field("title", FieldKind::Str)
                        .field("content", FieldKind::Str)
                        .optional(
                            "status",
                            FieldKind::Enum(vec!["draft".into(), "publish".into(), "pending".into(), "private".into()]),
                        ),
                )
                .auth(auth_schema()),
        )
        .action(
            ActionEntry::new("list_posts", "List the site's posts", Arc::new(ListPosts))
                .args(
                    ObjectSchema::new()
                        .optional("search", FieldKind::Str)
                        .optional("per_page", FieldKind::Num),
                )
                .auth(auth_schema()),
        )
}

fn auth_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("site_url", FieldKind::Str)
        .field("username", FieldKind::Str)
        .field("application_password", FieldKind::Str)
}

fn api_root(auth: &Value) -> Result<String, HandlerError> {
    let site_url = require_str(auth, "site_url")?;
    Ok(format!("{}/wp-json/wp/v2", site_url.trim_end_matches('/')))
}

fn credentials(auth: &Value) -> Result<(String, String), HandlerError> {
    Ok((
        require_str(auth, "username")?.to_string(),
        require_str(auth, "application_password")?.to_string(),
    ))
}

struct CreatePost;

#[async_trait]
impl Handler for CreatePost {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let (username, password) = credentials(&auth)?;
        let title = require_str(&args, "title")?;
        let content = require_str(&args, "content")?;
        let status = opt_str(&args, "status").unwrap_or("draft");

        let request = ctx
            .http
            .post(format!("{}/posts", api_root(&auth)?))
            .basic_auth(username, Some(password))
            .json(&json!({"title": title, "content": content, "status": status}));

        match send_json(PROVIDER, request).await {
            Ok(body) => Ok(reshape_post(&body)),
            Err(HandlerError::Network { .. }) => {
                let record = json!({
                    "id": 100 + ctx.store.list(PROVIDER, "posts").len() as u64 + 1,
                    "title": title,
                    "status": status,
                    "link": format!("https://example.com/?p={}", 100 + ctx.store.list(PROVIDER, "posts").len() + 1)
                });
                ctx.store.insert(PROVIDER, "posts", record.clone());
                Ok(mark_mock(reshape_post(&record)))
            }
            Err(error) => Err(error),
        }
    }
}

struct ListPosts;

#[async_trait]
impl Handler for ListPosts {
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError> {
        let (username, password) = credentials(&auth)?;
        let per_page = opt_u64(&args, "per_page").unwrap_or(10);

        let mut query: Vec<(&str, String)> = vec![("per_page", per_page.to_string())];
        if let Some(search) = opt_str(&args, "search") {
            query.push(("search", search.to_string()));
        }

        let request = ctx
            .http
            .get(format!("{}/posts", api_root(&auth)?))
            .basic_auth(username, Some(password))
            .query(&query);

        match send_json(PROVIDER, request).await {
            Ok(body) => {
                let posts: Vec<Value> = body
                    .as_array()
                    .map(|list| list.iter().map(reshape_post).collect())
                    .unwrap_or_default();
                Ok(json!({"count": posts.len(), "posts": posts}))
            }
            Err(HandlerError::Network { .. }) => {
                let posts: Vec<Value> = ctx
                    .store
                    .list(PROVIDER, "posts")
                    .iter()
                    .map(reshape_post)
                    .collect();
                Ok(mark_mock(json!({"count": posts.len(), "posts": posts})))
            }
            Err(error) => Err(error),
        }
    }
}

/// Live responses carry `title.rendered`; mock records store a bare string.
fn reshape_post(post: &Value) -> Value {
    let title = match post.get("title") {
        Some(Value::Object(title)) => title.get("rendered").cloned().unwrap_or(Value::Null),
        Some(other) => other.clone(),
        None => Value::Null,
    };
    json!({
        "id": post.get("id"),
        "title": title,
        "status": post.get("status"),
        "link": post.get("link"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::post;
    use switchboard_engine::MockStore;
    use switchboard_registry::describe_schema;

    #[test]
    fn status_enum_covers_the_post_states() {
        let entry = provider();
        let create = entry.actions.iter().find(|a| a.name == "create_post").unwrap();
        let shape = describe_schema(create.args_schema.as_ref().unwrap());
        assert_eq!(shape["title"], "String");
        assert_eq!(shape["status"], "Optional<Enum<[draft, publish, pending, private]>>");
    }

    #[test]
    fn reshape_post_unwraps_rendered_titles() {
        let live = json!({"id": 7, "title": {"rendered": "A Post"}, "status": "publish", "link": "https://x/p=7"});
        assert_eq!(reshape_post(&live)["title"], "A Post");
        let stored = json!({"id": 8, "title": "Plain", "status": "draft", "link": null});
        assert_eq!(reshape_post(&stored)["title"], "Plain");
    }

    #[tokio::test]
    async fn create_post_sends_basic_auth_and_reshapes() {
        let router = Router::new().route(
            "/wp-json/wp/v2/posts",
            post(|headers: axum::http::HeaderMap| async move {
                assert!(
                    headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .is_some_and(|v| v.starts_with("Basic "))
                );
                axum::Json(json!({
                    "id": 42,
                    "title": {"rendered": "News"},
                    "status": "publish",
                    "link": "https://example.com/news",
                    "guid": {"rendered": "https://example.com/?p=42"}
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let ctx = HandlerContext::new(Arc::new(MockStore::seeded()));
        let auth = json!({"site_url": base, "username": "admin", "application_password": "abcd efgh"});
        let result = CreatePost
            .call(&ctx, json!({"title": "News", "content": "<p>hi</p>", "status": "publish"}), auth)
            .await
            .unwrap();
        assert_eq!(result, json!({"id": 42, "title": "News", "status": "publish", "link": "https://example.com/news"}));
    }

    #[tokio::test]
    async fn create_post_offline_inserts_into_mock_store() {
        let ctx = HandlerContext::new(Arc::new(MockStore::seeded()));
        let auth = json!({"site_url": "http://127.0.0.1:1", "username": "admin", "application_password": "x"});
        let result = CreatePost
            .call(&ctx, json!({"title": "Offline", "content": "body"}), auth)
            .await
            .unwrap();
        assert_eq!(result["mock"], true);
        assert_eq!(result["status"], "draft");
        assert_eq!(ctx.store.list(PROVIDER, "posts").len(), 2);
    }
}
