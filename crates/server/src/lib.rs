//! HTTP surface for the Switchboard gateway.
//!
//! Two routes: `GET /discover` publishes the introspected action catalog,
//! and `POST /mcp/{provider}/{action}` dispatches a validated request to
//! the registered handler. All dispatch responses share one envelope shape;
//! handled upstream failures answer `200` with `success: false`, and only
//! gateway-internal faults produce `500`.

pub mod config;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;

use tracing::info;

pub use config::{ConfigError, DEFAULT_BIND, ServerConfig};
pub use routes::{API_KEY_HEADER, AppState, router};

/// Bind and serve until `shutdown` resolves.
pub async fn serve(
    bind: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(address = %listener.local_addr()?, "switchboard listening");
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown).await
}
