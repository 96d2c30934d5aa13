//! Shared type definitions for the Switchboard gateway.
//!
//! This crate holds the schema model every other crate builds on:
//!
//! - [`FieldKind`] / [`ObjectSchema`] — the closed, tagged representation of
//!   a validated argument shape, registered once per action
//! - [`validate_object`] — checks a JSON value against an [`ObjectSchema`]
//! - [`Envelope`] — the uniform success/error response body
//! - catalog entry types serialized by the discovery endpoint

pub mod catalog;
pub mod envelope;
pub mod schema;
pub mod validate;

pub use catalog::{ActionCatalogEntry, ProviderCatalogEntry};
pub use envelope::{Envelope, EnvelopeError};
pub use schema::{FieldKind, ObjectSchema};
pub use validate::{FieldIssue, ValidationError, validate_object};
