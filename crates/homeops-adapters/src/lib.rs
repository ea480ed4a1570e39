//! # homeops-adapters
//!
//! Adapter layer of the HomeOps gateway.
//!
//! Every integration implements [`ServiceAdapter`], the common capability
//! contract: list, detail, search, plus a pure `configured` predicate.
//! The degrade-to-mock policy is deliberately asymmetric:
//!
//! - **unconfigured** adapter: return a deterministic `mock`-provenance
//!   dataset immediately, with no network attempt;
//! - **configured but failing** adapter: surface
//!   [`GatewayError::UpstreamUnavailable`] so a broken backend is visible
//!   as an error instead of being masked as demo data.
//!
//! Adapters are self-contained (never call each other), hold no mutable
//! state beyond a shared HTTP client, and are safe for concurrent use.

use async_trait::async_trait;
use homeops_core::{GatewayError, NormalizedResult, ResourceKind};

pub mod docker;
pub mod emby;
pub mod registry;

pub use docker::DockerAdapter;
pub use emby::EmbyAdapter;
pub use registry::AdapterRegistry;

/// The capability contract every integration implements.
#[async_trait]
pub trait ServiceAdapter: Send + Sync {
    /// Short adapter name, used in logs.
    fn name(&self) -> &'static str;

    /// Resource kinds this adapter serves. The registry enforces that at
    /// most one adapter claims each kind.
    fn kinds(&self) -> &'static [ResourceKind];

    /// Whether the adapter has enough configuration to attempt a live
    /// call. Pure: reads only the captured configuration subset.
    fn configured(&self) -> bool;

    /// List the resources of `kind`.
    async fn list(&self, kind: ResourceKind) -> Result<NormalizedResult, GatewayError>;

    /// Fetch detail/stats for a single resource. `NotFound` when `id` is
    /// absent from the live or mock dataset.
    async fn detail(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<NormalizedResult, GatewayError>;

    /// Case-insensitive substring search over the adapter's catalog.
    /// An empty query returns the full catalog; no matches yield an
    /// empty sequence, not an error.
    async fn search(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> Result<NormalizedResult, GatewayError>;
}

/// Map a failed upstream call to the gateway taxonomy.
///
/// Timeouts, connect failures, and body/decode errors all become
/// `UpstreamUnavailable`; the distinction lives in the message only.
pub(crate) fn upstream_error(adapter: &str, err: reqwest::Error) -> GatewayError {
    tracing::warn!(adapter, error = %err, "upstream call failed");
    GatewayError::UpstreamUnavailable(format!("{adapter}: {err}"))
}

/// True when `haystack` contains `needle` ignoring ASCII case. An empty
/// needle matches everything.
pub(crate) fn matches_query(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
