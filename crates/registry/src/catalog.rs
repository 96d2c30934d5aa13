//! Catalog construction for the discovery endpoint.
//!
//! The catalog is rebuilt from the registry on every call and never cached;
//! entries are transient documentation data, discarded after the response.

use indexmap::IndexMap;
use switchboard_types::{ActionCatalogEntry, ProviderCatalogEntry};
use switchboard_util::display_title;

use crate::describe::describe_schema;
use crate::registry::{ActionEntry, HandlerRegistry};
use crate::sample::SampleGenerator;

const SCHEMA_UNAVAILABLE_SUFFIX: &str = " (schema unavailable)";

/// Build catalog entries for every registered provider.
///
/// An action registered without an argument schema is still listed, with its
/// description annotated and empty schema/payload maps; a single degraded
/// action never aborts the build.
pub fn build_catalog(registry: &HandlerRegistry) -> Vec<ProviderCatalogEntry> {
    let generator = SampleGenerator::new();
    registry
        .providers()
        .iter()
        .map(|provider| ProviderCatalogEntry {
            provider_name: provider.name.clone(),
            display_name: display_title(&provider.name),
            description: provider.description.clone(),
            actions: provider
                .actions
                .iter()
                .map(|action| action_entry(action, &generator))
                .collect(),
        })
        .collect()
}

fn action_entry(action: &ActionEntry, generator: &SampleGenerator) -> ActionCatalogEntry {
    let (description, args_schema, sample_payload) = match &action.args_schema {
        Some(schema) => (
            action.description.clone(),
            describe_schema(schema),
            generator.sample_payload(schema),
        ),
        None => (
            format!("{}{SCHEMA_UNAVAILABLE_SUFFIX}", action.description),
            IndexMap::new(),
            IndexMap::new(),
        ),
    };

    ActionCatalogEntry {
        action_name: action.name.clone(),
        display_name: display_title(&action.name),
        description,
        args_schema,
        sample_payload,
    }
}
