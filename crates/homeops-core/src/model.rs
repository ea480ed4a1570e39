//! Normalized result model.
//!
//! Every adapter translates its upstream's response into these types, so
//! callers see one shape regardless of which integration served the
//! request. Each result carries a provenance tag so demo data can never
//! be mistaken for real state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The resource kinds the gateway can dispatch on.
///
/// Future integrations (Servarr, UniFi, CrowdSec) add variants here plus
/// a registry entry; nothing else changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Docker containers.
    Containers,
    /// Emby playback sessions.
    Sessions,
    /// Emby media library items.
    Media,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Containers => write!(f, "containers"),
            Self::Sessions => write!(f, "sessions"),
            Self::Media => write!(f, "media"),
        }
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Fetched from a real upstream.
    Live,
    /// Synthesized because the adapter is not configured.
    Mock,
}

/// One running (or stopped) container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub image: String,
}

/// Resource usage for a single container. Memory figures are bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStats {
    pub container_id: String,
    pub cpu_percent: f64,
    pub memory_usage: u64,
    pub memory_limit: u64,
}

/// One item in the media catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

/// One active playback session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub user: String,
    pub device: String,
    pub now_playing: MediaItem,
}

/// Acknowledgment for a logged action. The action is recorded, never
/// executed; `status` is always `"simulated"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    pub action: String,
    pub status: String,
    pub record_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Kind-tagged payload of a normalized result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Containers(Vec<ContainerSummary>),
    ContainerStats(ContainerStats),
    Sessions(Vec<SessionSummary>),
    MediaItems(Vec<MediaItem>),
    ActionAck(ActionAck),
}

/// An adapter result: a payload plus where it came from.
///
/// Provenance is a mandatory field, not an option; a result without it
/// does not deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub provenance: Provenance,
    #[serde(flatten)]
    pub payload: Payload,
}

impl NormalizedResult {
    /// Wrap a payload fetched from a real upstream.
    pub fn live(payload: Payload) -> Self {
        Self {
            provenance: Provenance::Live,
            payload,
        }
    }

    /// Wrap a synthesized payload.
    pub fn mock(payload: Payload) -> Self {
        Self {
            provenance: Provenance::Mock,
            payload,
        }
    }
}
