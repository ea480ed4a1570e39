//! Adapter registry.
//!
//! Built once at startup from the configuration snapshot and injected
//! into the server state. Immutable for the process lifetime; there is
//! no hot reload and no global registry.

use std::collections::HashMap;
use std::sync::Arc;

use homeops_core::{GatewayConfig, GatewayError, ResourceKind};

use crate::{DockerAdapter, EmbyAdapter, ServiceAdapter};

/// Maps each resource kind to the single adapter serving it.
pub struct AdapterRegistry {
    adapters: HashMap<ResourceKind, Arc<dyn ServiceAdapter>>,
}

impl AdapterRegistry {
    /// Registry with no adapters. Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Build the full registry from the configuration snapshot.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let timeout = config.upstream_timeout();
        let mut registry = Self::empty();
        registry.register(Arc::new(DockerAdapter::new(config.docker.clone(), timeout)?))?;
        registry.register(Arc::new(EmbyAdapter::new(config.emby.clone(), timeout)?))?;
        Ok(registry)
    }

    /// Register an adapter for every kind it serves.
    ///
    /// At most one adapter per resource kind; a second claim on the same
    /// kind is a wiring bug and fails loudly.
    pub fn register(&mut self, adapter: Arc<dyn ServiceAdapter>) -> Result<(), GatewayError> {
        for kind in adapter.kinds() {
            if self.adapters.contains_key(kind) {
                return Err(GatewayError::Internal(format!(
                    "duplicate adapter registration for resource kind '{kind}'"
                )));
            }
            tracing::debug!(adapter = adapter.name(), kind = %kind, "registering adapter");
            self.adapters.insert(*kind, adapter.clone());
        }
        Ok(())
    }

    /// Look up the adapter for a resource kind.
    pub fn adapter_for(&self, kind: ResourceKind) -> Result<Arc<dyn ServiceAdapter>, GatewayError> {
        self.adapters
            .get(&kind)
            .cloned()
            .ok_or(GatewayError::UnknownResource(kind))
    }

    /// Kinds with a registered adapter.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        self.adapters.keys().copied().collect()
    }
}
