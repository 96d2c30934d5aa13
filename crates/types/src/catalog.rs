//! Catalog entry types serialized by the discovery endpoint.
//!
//! Entries are rebuilt from the registry on every discovery request and
//! discarded after the response is sent; nothing here is cached.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One action as published by discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCatalogEntry {
    /// Registered action identifier, e.g. `get_customer_by_email`.
    pub action_name: String,
    /// Title-cased label for documentation UIs.
    pub display_name: String,
    /// Action description; suffixed with `" (schema unavailable)"` when the
    /// action registered without an argument schema.
    pub description: String,
    /// Field name to inferred type label, in declaration order.
    pub args_schema: IndexMap<String, String>,
    /// Field name to synthesized example value.
    pub sample_payload: IndexMap<String, Value>,
}

/// One provider with all of its discoverable actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCatalogEntry {
    /// Registered provider identifier, e.g. `woocommerce`.
    pub provider_name: String,
    /// Title-cased label for documentation UIs.
    pub display_name: String,
    /// Provider description.
    pub description: String,
    /// Actions in registration order.
    pub actions: Vec<ActionCatalogEntry>,
}
