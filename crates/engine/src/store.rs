//! In-memory mock backend for offline and demo operation.
//!
//! Handlers fall back to this store when their one outbound call fails at
//! the network level, so a gateway without credentials (or without a
//! network) still answers with plausible data. The store is constructed
//! explicitly and injected through the handler context; [`MockStore::reset`]
//! restores the seed state between tests.

use std::sync::Mutex;

use indexmap::IndexMap;
use serde_json::{Value, json};

/// Collections of canned records keyed by `provider.collection`.
#[derive(Debug, Default)]
pub struct MockStore {
    collections: Mutex<IndexMap<String, Vec<Value>>>,
}

impl MockStore {
    /// Empty store with no canned data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one plausible record per provider
    /// collection, mirroring the shapes the real APIs return.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.reset();
        store
    }

    /// Restore the seed collections, discarding any inserted records.
    pub fn reset(&self) {
        let mut collections = self.lock();
        collections.clear();
        for (key, records) in seed_collections() {
            collections.insert(key.to_string(), records);
        }
    }

    /// All records in a collection; empty when the collection is unknown.
    pub fn list(&self, provider: &str, collection: &str) -> Vec<Value> {
        self.lock().get(&key(provider, collection)).cloned().unwrap_or_default()
    }

    /// First record in a collection matching `field == value`.
    pub fn find(&self, provider: &str, collection: &str, field: &str, value: &str) -> Option<Value> {
        self.list(provider, collection)
            .into_iter()
            .find(|record| record.get(field).and_then(Value::as_str) == Some(value))
    }

    /// Append a record, creating the collection on first use.
    pub fn insert(&self, provider: &str, collection: &str, record: Value) {
        self.lock().entry(key(provider, collection)).or_default().push(record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, Vec<Value>>> {
        // A poisoned store only means a previous test panicked mid-insert;
        // the canned data is still usable.
        self.collections.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn key(provider: &str, collection: &str) -> String {
    format!("{provider}.{collection}")
}

/// Tag a fallback record so consumers can tell canned data from live data.
pub fn mark_mock(mut value: Value) -> Value {
    if let Some(map) = value.as_object_mut() {
        map.insert("mock".to_string(), Value::Bool(true));
    }
    value
}

fn seed_collections() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        (
            "stripe.customers",
            vec![json!({
                "id": "cus_mock_001",
                "email": "ada@example.com",
                "name": "Ada Lovelace",
                "created": 1_700_000_000
            })],
        ),
        (
            "stripe.invoices",
            vec![json!({
                "id": "in_mock_001",
                "customer": "cus_mock_001",
                "status": "draft",
                "amount_due": 4200
            })],
        ),
        (
            "hubspot.contacts",
            vec![json!({
                "id": "501",
                "email": "grace@example.com",
                "firstname": "Grace",
                "lastname": "Hopper"
            })],
        ),
        (
            "shopify.orders",
            vec![json!({
                "id": 1001,
                "name": "#1001",
                "email": "ada@example.com",
                "financial_status": "paid",
                "total_price": "19.99",
                "currency": "USD"
            })],
        ),
        (
            "woocommerce.products",
            vec![json!({
                "id": 77,
                "name": "Mechanical Keyboard",
                "sku": "KB-77",
                "price": "89.00",
                "stock_status": "instock"
            })],
        ),
        (
            "calendly.events",
            vec![json!({
                "uri": "https://api.calendly.com/scheduled_events/mock-event-1",
                "name": "Intro Call",
                "status": "active",
                "start_time": "2026-01-05T15:00:00Z",
                "end_time": "2026-01-05T15:30:00Z"
            })],
        ),
        (
            "wordpress.posts",
            vec![json!({
                "id": 12,
                "title": "Hello World",
                "status": "publish",
                "link": "https://example.com/hello-world"
            })],
        ),
        (
            "klaviyo.profiles",
            vec![json!({
                "id": "01HMOCKPROFILE",
                "email": "margaret@example.com",
                "first_name": "Margaret",
                "last_name": "Hamilton"
            })],
        ),
        ("klaviyo.events", Vec::new()),
    ]
}
