//! Dispatch engine for Switchboard handlers.
//!
//! A handler is one validate-free unit of plumbing: it receives already
//! validated `args` and `auth` JSON, makes exactly one outbound REST call
//! through the shared client, and reshapes the response. This crate supplies
//! the pieces handlers share:
//!
//! - [`Handler`] — the async trait every action implements
//! - [`HandlerContext`] — shared `reqwest::Client` plus the injected
//!   [`MockStore`] used as a fallback backend when the network is down
//! - [`send_json`] — single-attempt request execution with uniform error
//!   mapping (no retries, no timeout override beyond the client default)
//! - [`HandlerError`] — the error taxonomy dispatch maps onto HTTP codes

pub mod context;
pub mod error;
pub mod extract;
pub mod http;
pub mod store;

pub use context::{Handler, HandlerContext};
pub use error::HandlerError;
pub use extract::{opt_bool, opt_str, opt_u64, require_str};
pub use http::send_json;
pub use store::{MockStore, mark_mock};
