//! Handler trait and the per-process dispatch context.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HandlerError;
use crate::store::MockStore;

/// One dispatchable action.
///
/// Implementations receive `args` and `auth` already validated against the
/// schemas they registered with, perform exactly one outbound call, and
/// return the reshaped provider response.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Execute the action.
    async fn call(&self, ctx: &HandlerContext, args: Value, auth: Value) -> Result<Value, HandlerError>;
}

/// Shared resources handed to every handler invocation.
///
/// The mock store is constructed explicitly and injected here rather than
/// living as module-global state, so tests can reset it and deployments
/// without credentials still answer from canned data.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    /// Shared outbound HTTP client. Connection pooling and the 30s timeout
    /// come from the client itself; handlers never override them.
    pub http: reqwest::Client,
    /// In-memory fallback backend consulted on network failure.
    pub store: Arc<MockStore>,
}

impl HandlerContext {
    /// Build a context around a freshly configured client and the given store.
    pub fn new(store: Arc<MockStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("switchboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { http, store }
    }
}

impl Default for HandlerContext {
    fn default() -> Self {
        Self::new(Arc::new(MockStore::seeded()))
    }
}
