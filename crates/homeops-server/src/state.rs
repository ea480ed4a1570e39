//! Shared application state.

use std::sync::Arc;

use homeops_adapters::AdapterRegistry;
use homeops_core::GatewayConfig;

use crate::actions::ActionLog;

/// State shared by every request handler.
///
/// The configuration snapshot and the adapter registry are immutable
/// for the process lifetime; the action log is the only mutable piece
/// and guards its own appends.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub registry: Arc<AdapterRegistry>,
    pub actions: Arc<ActionLog>,
}

impl AppState {
    /// Assemble the state from an already-built registry.
    pub fn new(config: Arc<GatewayConfig>, registry: Arc<AdapterRegistry>) -> Self {
        Self {
            config,
            registry,
            actions: Arc::new(ActionLog::default()),
        }
    }
}
