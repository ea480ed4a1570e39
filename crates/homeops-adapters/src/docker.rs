//! Adapter for the Docker Engine HTTP API.
//!
//! When `DOCKER_API_URL` is set the adapter talks to the Engine API
//! (`/containers/json`, `/containers/{id}/stats?stream=false`) and
//! normalizes the responses. Without it the adapter serves a fixed mock
//! dataset and never touches the network.

use std::time::Duration;

use async_trait::async_trait;
use homeops_core::{
    ContainerStats, ContainerSummary, DockerConfig, GatewayError, NormalizedResult, Payload,
    ResourceKind,
};
use serde::Deserialize;

use crate::{ServiceAdapter, matches_query, upstream_error};

const ADAPTER_NAME: &str = "docker";

/// Adapter for Docker container visibility.
pub struct DockerAdapter {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl DockerAdapter {
    /// Build the adapter from its configuration subset. The timeout
    /// bounds every upstream call.
    pub fn new(config: DockerConfig, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("building docker http client: {e}")))?;
        Ok(Self {
            base_url: config.base_url,
            client,
        })
    }

    async fn fetch_containers(&self, base: &str) -> Result<Vec<ContainerSummary>, GatewayError> {
        let url = format!("{base}/containers/json");
        let resp = self
            .client
            .get(&url)
            .query(&[("all", "true")])
            .send()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?
            .error_for_status()
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;

        let containers: Vec<EngineContainer> = resp
            .json()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;
        Ok(containers.into_iter().map(EngineContainer::normalize).collect())
    }

    async fn fetch_stats(&self, base: &str, id: &str) -> Result<ContainerStats, GatewayError> {
        let url = format!("{base}/containers/{id}/stats");
        let resp = self
            .client
            .get(&url)
            .query(&[("stream", "false")])
            .send()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(format!("no such container: {id}")));
        }
        let resp = resp
            .error_for_status()
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;

        let stats: EngineStats = resp
            .json()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;
        Ok(stats.normalize(id))
    }
}

#[async_trait]
impl ServiceAdapter for DockerAdapter {
    fn name(&self) -> &'static str {
        ADAPTER_NAME
    }

    fn kinds(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Containers]
    }

    fn configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn list(&self, _kind: ResourceKind) -> Result<NormalizedResult, GatewayError> {
        match &self.base_url {
            Some(base) => {
                let containers = self.fetch_containers(base).await?;
                Ok(NormalizedResult::live(Payload::Containers(containers)))
            }
            None => Ok(NormalizedResult::mock(Payload::Containers(
                mock_containers(),
            ))),
        }
    }

    async fn detail(
        &self,
        _kind: ResourceKind,
        id: &str,
    ) -> Result<NormalizedResult, GatewayError> {
        match &self.base_url {
            Some(base) => {
                let stats = self.fetch_stats(base, id).await?;
                Ok(NormalizedResult::live(Payload::ContainerStats(stats)))
            }
            None => {
                let known = mock_containers()
                    .iter()
                    .any(|c| c.id == id || c.name == id);
                if !known {
                    return Err(GatewayError::NotFound(format!("no such container: {id}")));
                }
                Ok(NormalizedResult::mock(Payload::ContainerStats(mock_stats(
                    id,
                ))))
            }
        }
    }

    async fn search(
        &self,
        _kind: ResourceKind,
        query: &str,
    ) -> Result<NormalizedResult, GatewayError> {
        let (provenance_live, catalog) = match &self.base_url {
            Some(base) => (true, self.fetch_containers(base).await?),
            None => (false, mock_containers()),
        };
        let matches: Vec<ContainerSummary> = catalog
            .into_iter()
            .filter(|c| matches_query(&c.name, query) || matches_query(&c.image, query))
            .collect();
        let payload = Payload::Containers(matches);
        Ok(if provenance_live {
            NormalizedResult::live(payload)
        } else {
            NormalizedResult::mock(payload)
        })
    }
}

// ---------------------------------------------------------------------------
// Engine API wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EngineContainer {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Names", default)]
    names: Vec<String>,
    #[serde(rename = "Image", default)]
    image: String,
    #[serde(rename = "State", default)]
    state: String,
}

impl EngineContainer {
    fn normalize(self) -> ContainerSummary {
        // The Engine API reports names with a leading slash.
        let name = self
            .names
            .first()
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_else(|| self.id.clone());
        ContainerSummary {
            id: self.id,
            name,
            status: self.state,
            image: self.image,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct EngineCpuUsage {
    #[serde(default)]
    total_usage: u64,
}

#[derive(Debug, Deserialize, Default)]
struct EngineCpuStats {
    #[serde(default)]
    cpu_usage: EngineCpuUsage,
    #[serde(default)]
    system_cpu_usage: u64,
    #[serde(default)]
    online_cpus: u32,
}

#[derive(Debug, Deserialize, Default)]
struct EngineMemoryStats {
    #[serde(default)]
    usage: u64,
    #[serde(default)]
    limit: u64,
}

#[derive(Debug, Deserialize, Default)]
struct EngineStats {
    #[serde(default)]
    cpu_stats: EngineCpuStats,
    #[serde(default)]
    precpu_stats: EngineCpuStats,
    #[serde(default)]
    memory_stats: EngineMemoryStats,
}

impl EngineStats {
    /// CPU percent from the cpu/precpu sample deltas, as the Engine docs
    /// prescribe for one-shot stats.
    fn normalize(self, id: &str) -> ContainerStats {
        let cpu_delta = self
            .cpu_stats
            .cpu_usage
            .total_usage
            .saturating_sub(self.precpu_stats.cpu_usage.total_usage);
        let system_delta = self
            .cpu_stats
            .system_cpu_usage
            .saturating_sub(self.precpu_stats.system_cpu_usage);
        let cpu_percent = if system_delta > 0 {
            (cpu_delta as f64 / system_delta as f64) * self.cpu_stats.online_cpus.max(1) as f64
                * 100.0
        } else {
            0.0
        };
        ContainerStats {
            container_id: id.to_string(),
            cpu_percent,
            memory_usage: self.memory_stats.usage,
            memory_limit: self.memory_stats.limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Mock dataset
// ---------------------------------------------------------------------------

/// Fixed container dataset served in mock mode.
pub fn mock_containers() -> Vec<ContainerSummary> {
    vec![
        ContainerSummary {
            id: "abc123def456".to_string(),
            name: "crowdsec".to_string(),
            status: "running".to_string(),
            image: "crowdsecurity/crowdsec:latest".to_string(),
        },
        ContainerSummary {
            id: "789ghi012jkl".to_string(),
            name: "emby".to_string(),
            status: "running".to_string(),
            image: "emby/embyserver:4.8.10".to_string(),
        },
        ContainerSummary {
            id: "345mno678pqr".to_string(),
            name: "qbittorrent".to_string(),
            status: "running".to_string(),
            image: "linuxserver/qbittorrent:latest".to_string(),
        },
    ]
}

/// Fixed stats served in mock mode: 2.35% CPU, 256 MiB of 2 GiB.
pub fn mock_stats(id: &str) -> ContainerStats {
    ContainerStats {
        container_id: id.to_string(),
        cpu_percent: 2.35,
        memory_usage: 268_435_456,
        memory_limit: 2_147_483_648,
    }
}
