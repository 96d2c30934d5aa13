//! Provider handler modules for the Switchboard gateway.
//!
//! Each module registers one SaaS provider: its actions, argument and auth
//! schemas, and handlers. Handlers are pure plumbing — dispatch has already
//! validated `args` and `auth` against the registered schemas, so each
//! handler builds one REST request, sends it once through
//! [`switchboard_engine::send_json`], and reshapes the response. When the
//! network itself fails, handlers answer from the injected mock store so
//! demo deployments stay usable.

pub mod calendly;
pub mod hubspot;
pub mod klaviyo;
pub mod shopify;
pub mod stripe;
pub mod woocommerce;
pub mod wordpress;

use switchboard_registry::HandlerRegistry;

/// Registry with every built-in provider registered, in catalog order.
pub fn default_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(stripe::provider());
    registry.register(hubspot::provider());
    registry.register(shopify::provider());
    registry.register(woocommerce::provider());
    registry.register(calendly::provider());
    registry.register(wordpress::provider());
    registry.register(klaviyo::provider());
    registry
}
