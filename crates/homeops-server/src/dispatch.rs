//! Request dispatcher.
//!
//! Pure mapping from (resource kind, operation) to the registered
//! adapter's operation. No retries: adapter failures pass through
//! unchanged, and only the response layer wraps them in the envelope.

use homeops_adapters::AdapterRegistry;
use homeops_core::{GatewayError, NormalizedResult, ResourceKind};

/// The operation a request maps to.
#[derive(Debug, Clone)]
pub enum Operation {
    List,
    Detail(String),
    Search(String),
}

/// Route one request to the adapter registered for `kind`.
pub async fn dispatch(
    registry: &AdapterRegistry,
    kind: ResourceKind,
    operation: Operation,
) -> Result<NormalizedResult, GatewayError> {
    let adapter = registry.adapter_for(kind)?;
    tracing::debug!(adapter = adapter.name(), kind = %kind, ?operation, "dispatching");
    match operation {
        Operation::List => adapter.list(kind).await,
        Operation::Detail(id) => adapter.detail(kind, &id).await,
        Operation::Search(query) => adapter.search(kind, &query).await,
    }
}
