//! InputCast server entry point.
//!
//! Wires together the lifecycle orchestrator and the Tokio async runtime.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ AppHost::builder().build()
//!  └─ host.run()
//!       ├─ ServiceContext        -- stores, storage gateway, simulator
//!       ├─ HTTP command API      -- axum listener (Tokio task)
//!       ├─ Presence beacon       -- UDP broadcast (background thread)
//!       └─ Load pipelines        -- configurations + scripts from disk
//! ```

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use inputcast_server::application::orchestrator::AppHost;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("InputCast server starting");

    let host = AppHost::builder().build();

    if let Err(e) = host.run().await {
        error!("startup failed: {e:#}");
        host.stop_all().await;
        return Err(e);
    }

    info!("InputCast server ready.  Press Ctrl-C to exit.");

    tokio::signal::ctrl_c().await.ok();
    info!("shutdown signal received");

    host.stop_all().await;
    info!("InputCast server stopped");
    Ok(())
}
