//! Gateway error taxonomy.
//!
//! The stable `kind()` identifier is the contract callers and tests may
//! depend on; the Display message is informational only.

use thiserror::Error;

use crate::model::ResourceKind;

/// Errors surfaced by the gateway core.
///
/// No variant is fatal to the process: a failing request never degrades
/// handling of subsequent requests.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or incorrect API key.
    #[error("invalid or missing API key")]
    Unauthorized,

    /// No adapter registered for the requested resource kind.
    #[error("no adapter registered for resource kind '{0}'")]
    UnknownResource(ResourceKind),

    /// Action name is not on the allow-list.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// Identifier absent from the live or mock dataset.
    #[error("not found: {0}")]
    NotFound(String),

    /// A configured adapter's upstream call failed or timed out. Never
    /// masked as mock data.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Stable kind identifier for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::UnknownResource(_) => "unknown_resource",
            Self::UnknownAction(_) => "unknown_action",
            Self::NotFound(_) => "not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::Internal(_) => "internal",
        }
    }
}
