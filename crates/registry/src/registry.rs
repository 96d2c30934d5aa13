//! Provider/action registry and lookup.

use std::sync::Arc;

use switchboard_engine::Handler;
use switchboard_types::{FieldKind, ObjectSchema};

/// One registered action: metadata, schemas, and the handler to invoke.
#[derive(Clone)]
pub struct ActionEntry {
    /// Action identifier within its provider, e.g. `create_customer`.
    pub name: String,
    /// Short description for the catalog.
    pub description: String,
    /// Argument schema; `None` marks the action "schema unavailable" in the
    /// catalog but does not prevent registration.
    pub args_schema: Option<FieldKind>,
    /// Credential schema validated against the request's `auth` object.
    pub auth_schema: Option<FieldKind>,
    /// The handler invoked by dispatch.
    pub handler: Arc<dyn Handler>,
}

impl ActionEntry {
    /// New action with no schemas attached yet.
    pub fn new(name: &str, description: &str, handler: Arc<dyn Handler>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            args_schema: None,
            auth_schema: None,
            handler,
        }
    }

    /// Attach the argument schema.
    pub fn args(mut self, schema: ObjectSchema) -> Self {
        self.args_schema = Some(FieldKind::Obj(schema));
        self
    }

    /// Attach the auth/credential schema.
    pub fn auth(mut self, schema: ObjectSchema) -> Self {
        self.auth_schema = Some(FieldKind::Obj(schema));
        self
    }
}

impl std::fmt::Debug for ActionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionEntry")
            .field("name", &self.name)
            .field("has_args_schema", &self.args_schema.is_some())
            .field("has_auth_schema", &self.auth_schema.is_some())
            .finish()
    }
}

/// One provider with its registered actions, in registration order.
#[derive(Debug, Clone)]
pub struct ProviderEntry {
    /// Provider identifier, e.g. `stripe`.
    pub name: String,
    /// Short description for the catalog.
    pub description: String,
    /// Actions in registration order.
    pub actions: Vec<ActionEntry>,
}

impl ProviderEntry {
    /// New provider with no actions yet.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn action(mut self, action: ActionEntry) -> Self {
        self.actions.push(action);
        self
    }
}

/// All registered providers; built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    providers: Vec<ProviderEntry>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider and its actions.
    pub fn register(&mut self, provider: ProviderEntry) {
        self.providers.push(provider);
    }

    /// Providers in registration order.
    pub fn providers(&self) -> &[ProviderEntry] {
        &self.providers
    }

    /// Look up an action by exact `(provider, action)` pair.
    pub fn find(&self, provider: &str, action: &str) -> Option<&ActionEntry> {
        self.providers
            .iter()
            .find(|entry| entry.name == provider)?
            .actions
            .iter()
            .find(|entry| entry.name == action)
    }
}
