//! HTTP API for the route advisor.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness message
//! - `POST /data` - Direct model answer for a trip (JSON string)
//! - `POST /data2` - Same contract as `/data`
//! - `POST /agent` - Tool-loop answer for a trip (`{"result": ...}`)

mod routes;
pub mod types;

pub use routes::{router, AppState};

use std::sync::Arc;

use crate::agent::Dispatcher;
use crate::config::Config;

/// Start the HTTP server and serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let dispatcher = Dispatcher::from_config(&config);
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { config, dispatcher });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
