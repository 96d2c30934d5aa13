use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use switchboard_engine::{HandlerContext, MockStore};
use switchboard_server::{AppState, ServerConfig, serve};

/// Internal gateway dispatching SaaS actions behind one HTTP surface.
#[derive(Debug, Parser)]
#[command(name = "switchboard", version, about)]
struct Args {
    /// Bind address, overriding SWITCHBOARD_BIND.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("loading server configuration")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let registry = switchboard_providers::default_registry();
    let ctx = HandlerContext::new(Arc::new(MockStore::seeded()));
    let state = AppState::new(registry, ctx, &config.internal_api_key);

    serve(config.bind, state, shutdown_signal())
        .await
        .context("running the gateway server")?;
    info!("shut down cleanly");
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
