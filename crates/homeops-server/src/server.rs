//! Gateway server bootstrap.

use std::sync::Arc;

use homeops_adapters::AdapterRegistry;
use homeops_core::{GatewayConfig, GatewayError};
use tokio::net::TcpListener;

use crate::routes;
use crate::state::AppState;

/// The HTTP gateway server.
pub struct GatewayServer {
    state: AppState,
}

impl GatewayServer {
    /// Build the registry and state from the configuration snapshot.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let registry = AdapterRegistry::from_config(&config)?;
        let state = AppState::new(Arc::new(config), Arc::new(registry));
        Ok(Self { state })
    }

    /// Bind and serve until ctrl-c.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.state.config.listen_addr.clone();
        tracing::info!(
            address = %addr,
            version = env!("CARGO_PKG_VERSION"),
            log_level = %self.state.config.log_level,
            "server_starting"
        );

        let app = routes::create_router(self.state);
        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server_shutting_down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
    }
}
