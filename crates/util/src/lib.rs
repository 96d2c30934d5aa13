//! Utility helpers shared across the Switchboard crates.

pub mod redact;
pub mod text;

pub use redact::{redact_json, redact_sensitive};
pub use text::{display_title, sanitize_token};
