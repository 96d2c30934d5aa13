//! End-to-end route tests over a real socket.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use switchboard_engine::{Handler, HandlerContext, HandlerError, MockStore};
use switchboard_registry::{ActionEntry, HandlerRegistry, ProviderEntry};
use switchboard_server::{API_KEY_HEADER, AppState, router};
use switchboard_types::{FieldKind, ObjectSchema};

const API_KEY: &str = "test-internal-key";

struct Echo;

#[async_trait]
impl Handler for Echo {
    async fn call(&self, _ctx: &HandlerContext, args: Value, _auth: Value) -> Result<Value, HandlerError> {
        Ok(args)
    }
}

struct UpstreamFail;

#[async_trait]
impl Handler for UpstreamFail {
    async fn call(&self, _ctx: &HandlerContext, _args: Value, _auth: Value) -> Result<Value, HandlerError> {
        Err(HandlerError::Upstream {
            provider: "fake",
            status: 402,
            message: "card declined".to_string(),
        })
    }
}

struct InternalFail;

#[async_trait]
impl Handler for InternalFail {
    async fn call(&self, _ctx: &HandlerContext, _args: Value, _auth: Value) -> Result<Value, HandlerError> {
        Err(HandlerError::Internal("lock poisoned".to_string()))
    }
}

fn fake_registry() -> HandlerRegistry {
    let args = || {
        ObjectSchema::new()
            .field("email", FieldKind::Str)
            .optional("limit", FieldKind::Num)
    };
    let auth = || ObjectSchema::new().field("api_key", FieldKind::Str);

    let mut registry = HandlerRegistry::new();
    registry.register(
        ProviderEntry::new("fake", "Test provider")
            .action(
                ActionEntry::new("echo", "Echo the args back", Arc::new(Echo))
                    .args(args())
                    .auth(auth()),
            )
            .action(
                ActionEntry::new("charge", "Always fails upstream", Arc::new(UpstreamFail))
                    .args(args())
                    .auth(auth()),
            )
            .action(
                ActionEntry::new("explode", "Always faults internally", Arc::new(InternalFail))
                    .args(args())
                    .auth(auth()),
            ),
    );
    registry
}

async fn start_server() -> String {
    let state = AppState::new(
        fake_registry(),
        HandlerContext::new(Arc::new(MockStore::new())),
        API_KEY,
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router(state)).await;
    });
    base
}

fn valid_body() -> Value {
    json!({"args": {"email": "a@b.c"}, "auth": {"api_key": "k"}})
}

#[tokio::test]
async fn dispatch_requires_the_internal_api_key() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/mcp/fake/echo"))
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .post(format!("{base}/mcp/fake/echo"))
        .header(API_KEY_HEADER, "wrong")
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn dispatch_success_wraps_data_in_the_envelope() {
    let base = start_server().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/mcp/fake/echo"))
        .header(API_KEY_HEADER, API_KEY)
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "data": {"email": "a@b.c"}}));
}

#[tokio::test]
async fn unknown_pairs_are_not_found() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    for path in ["/mcp/fake/missing", "/mcp/nobody/echo"] {
        let response = client
            .post(format!("{base}{path}"))
            .header(API_KEY_HEADER, API_KEY)
            .json(&valid_body())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404, "{path}");
    }
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    // Missing auth object entirely.
    let response = client
        .post(format!("{base}/mcp/fake/echo"))
        .header(API_KEY_HEADER, API_KEY)
        .json(&json!({"args": {"email": "a@b.c"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // args present but failing schema validation.
    let response = client
        .post(format!("{base}/mcp/fake/echo"))
        .header(API_KEY_HEADER, API_KEY)
        .json(&json!({"args": {"limit": 3}, "auth": {"api_key": "k"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("email"), "{message}");

    // auth failing schema validation.
    let response = client
        .post(format!("{base}/mcp/fake/echo"))
        .header(API_KEY_HEADER, API_KEY)
        .json(&json!({"args": {"email": "a@b.c"}, "auth": {}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn handled_upstream_failures_answer_200_with_an_error_envelope() {
    let base = start_server().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/mcp/fake/charge"))
        .header(API_KEY_HEADER, API_KEY)
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["provider_status"], 402);
}

#[tokio::test]
async fn internal_faults_are_500() {
    let base = start_server().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/mcp/fake/explode"))
        .header(API_KEY_HEADER, API_KEY)
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].get("provider_status").is_none());
}

#[tokio::test]
async fn discover_is_open_and_lists_schemas_and_samples() {
    let base = start_server().await;
    let response = reqwest::Client::new()
        .get(format!("{base}/discover"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();

    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0]["provider_name"], "fake");
    assert_eq!(providers[0]["display_name"], "Fake");

    let echo = &providers[0]["actions"][0];
    assert_eq!(echo["action_name"], "echo");
    assert_eq!(echo["display_name"], "Echo");
    assert_eq!(echo["args_schema"]["email"], "String");
    assert_eq!(echo["args_schema"]["limit"], "Optional<Number>");
    assert_eq!(echo["sample_payload"]["email"], "user@example.com");
    assert_eq!(echo["sample_payload"]["limit"], 123);
}
