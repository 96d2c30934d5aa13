//! Handler registry and the discovery introspection core.
//!
//! The registry maps `(provider, action)` to a registered [`ActionEntry`];
//! discovery walks it to build the provider catalog. The two introspection
//! pieces — the schema descriptor in [`describe`] and the sample payload
//! generator in [`sample`] — never fail: unrecognizable shapes degrade to
//! `UnknownType` labels or empty mappings, and one badly registered action
//! never aborts a catalog build.

pub mod catalog;
pub mod describe;
pub mod registry;
pub mod sample;

pub use catalog::build_catalog;
pub use describe::{describe_schema, field_label};
pub use registry::{ActionEntry, HandlerRegistry, ProviderEntry};
pub use sample::SampleGenerator;
