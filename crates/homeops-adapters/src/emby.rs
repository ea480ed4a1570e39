//! Adapter for the Emby Media Server REST API.
//!
//! Configured means both `EMBY_URL` and `EMBY_API_KEY` are present; with
//! either missing the adapter serves deterministic mock sessions and a
//! fixed mock catalog. Live calls hit `/emby/Sessions` and `/emby/Items`.

use std::time::Duration;

use async_trait::async_trait;
use homeops_core::{
    EmbyConfig, GatewayError, MediaItem, NormalizedResult, Payload, ResourceKind, SessionSummary,
};
use serde::Deserialize;

use crate::{ServiceAdapter, matches_query, upstream_error};

const ADAPTER_NAME: &str = "emby";

/// Limit passed to Emby search queries.
const SEARCH_LIMIT: &str = "20";

/// Adapter for Emby session visibility and library search.
pub struct EmbyAdapter {
    base_url: Option<String>,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl EmbyAdapter {
    /// Build the adapter from its configuration subset.
    pub fn new(config: EmbyConfig, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("building emby http client: {e}")))?;
        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            client,
        })
    }

    /// Both the URL and the API key are needed for a live call.
    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.base_url, &self.api_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }

    async fn fetch_sessions(
        &self,
        base: &str,
        key: &str,
    ) -> Result<Vec<SessionSummary>, GatewayError> {
        let url = format!("{base}/emby/Sessions");
        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", key)])
            .send()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?
            .error_for_status()
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;

        let sessions: Vec<EmbySession> = resp
            .json()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;
        // Only sessions with active playback are interesting.
        Ok(sessions
            .into_iter()
            .filter_map(EmbySession::normalize)
            .collect())
    }

    async fn fetch_items(
        &self,
        base: &str,
        key: &str,
        query: &str,
    ) -> Result<Vec<MediaItem>, GatewayError> {
        let url = format!("{base}/emby/Items");
        let mut params = vec![
            ("api_key", key),
            ("Recursive", "true"),
            ("Limit", SEARCH_LIMIT),
        ];
        if !query.is_empty() {
            params.push(("SearchTerm", query));
        }
        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?
            .error_for_status()
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;

        let body: EmbyItemsResponse = resp
            .json()
            .await
            .map_err(|e| upstream_error(ADAPTER_NAME, e))?;
        Ok(body.items.into_iter().map(EmbyItem::normalize).collect())
    }
}

#[async_trait]
impl ServiceAdapter for EmbyAdapter {
    fn name(&self) -> &'static str {
        ADAPTER_NAME
    }

    fn kinds(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Sessions, ResourceKind::Media]
    }

    fn configured(&self) -> bool {
        self.credentials().is_some()
    }

    async fn list(&self, kind: ResourceKind) -> Result<NormalizedResult, GatewayError> {
        match kind {
            ResourceKind::Sessions => match self.credentials() {
                Some((base, key)) => {
                    let sessions = self.fetch_sessions(base, key).await?;
                    Ok(NormalizedResult::live(Payload::Sessions(sessions)))
                }
                None => Ok(NormalizedResult::mock(Payload::Sessions(mock_sessions()))),
            },
            ResourceKind::Media => match self.credentials() {
                Some((base, key)) => {
                    let items = self.fetch_items(base, key, "").await?;
                    Ok(NormalizedResult::live(Payload::MediaItems(items)))
                }
                None => Ok(NormalizedResult::mock(Payload::MediaItems(mock_catalog()))),
            },
            other => Err(GatewayError::UnknownResource(other)),
        }
    }

    async fn detail(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<NormalizedResult, GatewayError> {
        match kind {
            ResourceKind::Sessions => {
                let (live, sessions) = match self.credentials() {
                    Some((base, key)) => (true, self.fetch_sessions(base, key).await?),
                    None => (false, mock_sessions()),
                };
                let session = sessions
                    .into_iter()
                    .find(|s| s.id == id)
                    .ok_or_else(|| GatewayError::NotFound(format!("no such session: {id}")))?;
                let payload = Payload::Sessions(vec![session]);
                Ok(if live {
                    NormalizedResult::live(payload)
                } else {
                    NormalizedResult::mock(payload)
                })
            }
            ResourceKind::Media => {
                let (live, catalog) = match self.credentials() {
                    Some((base, key)) => (true, self.fetch_items(base, key, "").await?),
                    None => (false, mock_catalog()),
                };
                let item = catalog
                    .into_iter()
                    .find(|i| i.name.eq_ignore_ascii_case(id))
                    .ok_or_else(|| GatewayError::NotFound(format!("no such media item: {id}")))?;
                let payload = Payload::MediaItems(vec![item]);
                Ok(if live {
                    NormalizedResult::live(payload)
                } else {
                    NormalizedResult::mock(payload)
                })
            }
            other => Err(GatewayError::UnknownResource(other)),
        }
    }

    async fn search(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> Result<NormalizedResult, GatewayError> {
        match kind {
            ResourceKind::Media => match self.credentials() {
                // Emby does the matching server-side on the live path.
                Some((base, key)) => {
                    let items = self.fetch_items(base, key, query).await?;
                    Ok(NormalizedResult::live(Payload::MediaItems(items)))
                }
                None => {
                    let matches: Vec<MediaItem> = mock_catalog()
                        .into_iter()
                        .filter(|i| matches_query(&i.name, query))
                        .collect();
                    Ok(NormalizedResult::mock(Payload::MediaItems(matches)))
                }
            },
            ResourceKind::Sessions => {
                let (live, sessions) = match self.credentials() {
                    Some((base, key)) => (true, self.fetch_sessions(base, key).await?),
                    None => (false, mock_sessions()),
                };
                let matches: Vec<SessionSummary> = sessions
                    .into_iter()
                    .filter(|s| {
                        matches_query(&s.user, query)
                            || matches_query(&s.device, query)
                            || matches_query(&s.now_playing.name, query)
                    })
                    .collect();
                let payload = Payload::Sessions(matches);
                Ok(if live {
                    NormalizedResult::live(payload)
                } else {
                    NormalizedResult::mock(payload)
                })
            }
            other => Err(GatewayError::UnknownResource(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Emby wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EmbySession {
    #[serde(rename = "Id", default)]
    id: String,
    #[serde(rename = "UserName", default)]
    user_name: String,
    #[serde(rename = "DeviceName", default)]
    device_name: String,
    #[serde(rename = "NowPlayingItem")]
    now_playing_item: Option<EmbyItem>,
}

impl EmbySession {
    /// Sessions without active playback are dropped.
    fn normalize(self) -> Option<SessionSummary> {
        let item = self.now_playing_item?;
        Some(SessionSummary {
            id: self.id,
            user: self.user_name,
            device: self.device_name,
            now_playing: item.normalize(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct EmbyItem {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Type", default)]
    item_type: String,
    #[serde(rename = "ProductionYear")]
    production_year: Option<i32>,
    #[serde(rename = "SeriesName")]
    series_name: Option<String>,
}

impl EmbyItem {
    fn normalize(self) -> MediaItem {
        MediaItem {
            name: self.name,
            kind: self.item_type,
            year: self.production_year,
            series: self.series_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmbyItemsResponse {
    #[serde(rename = "Items", default)]
    items: Vec<EmbyItem>,
}

// ---------------------------------------------------------------------------
// Mock dataset
// ---------------------------------------------------------------------------

/// Fixed playback sessions served in mock mode.
pub fn mock_sessions() -> Vec<SessionSummary> {
    vec![
        SessionSummary {
            id: "s-001".to_string(),
            user: "Alice".to_string(),
            device: "Living Room Roku".to_string(),
            now_playing: MediaItem {
                name: "Planet Earth III".to_string(),
                kind: "Episode".to_string(),
                year: None,
                series: Some("Planet Earth".to_string()),
            },
        },
        SessionSummary {
            id: "s-002".to_string(),
            user: "Bob".to_string(),
            device: "iPad Pro".to_string(),
            now_playing: MediaItem {
                name: "Interstellar".to_string(),
                kind: "Movie".to_string(),
                year: Some(2014),
                series: None,
            },
        },
    ]
}

/// Fixed media catalog served in mock mode.
pub fn mock_catalog() -> Vec<MediaItem> {
    vec![
        MediaItem {
            name: "Movie Night".to_string(),
            kind: "Movie".to_string(),
            year: Some(2023),
            series: None,
        },
        MediaItem {
            name: "Planet Earth III".to_string(),
            kind: "Series".to_string(),
            year: Some(2023),
            series: None,
        },
        MediaItem {
            name: "Interstellar".to_string(),
            kind: "Movie".to_string(),
            year: Some(2014),
            series: None,
        },
        MediaItem {
            name: "The Bear".to_string(),
            kind: "Series".to_string(),
            year: Some(2022),
            series: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeops_core::Provenance;

    fn unconfigured() -> EmbyAdapter {
        EmbyAdapter::new(EmbyConfig::default(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_url_without_key_is_unconfigured() {
        let adapter = EmbyAdapter::new(
            EmbyConfig {
                base_url: Some("http://nas:8096".to_string()),
                api_key: None,
            },
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(!adapter.configured());
    }

    #[tokio::test]
    async fn test_unconfigured_sessions_are_mock() {
        let adapter = unconfigured();
        let result = adapter.list(ResourceKind::Sessions).await.unwrap();
        assert_eq!(result.provenance, Provenance::Mock);
        match result.payload {
            Payload::Sessions(sessions) => {
                assert_eq!(sessions.len(), 2);
                assert_eq!(sessions[0].user, "Alice");
                assert_eq!(sessions[1].now_playing.name, "Interstellar");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let adapter = unconfigured();
        let result = adapter.search(ResourceKind::Media, "mov").await.unwrap();
        match result.payload {
            Payload::MediaItems(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].name, "Movie Night");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_search_returns_catalog() {
        let adapter = unconfigured();
        let result = adapter.search(ResourceKind::Media, "").await.unwrap();
        match result.payload {
            Payload::MediaItems(items) => assert_eq!(items.len(), 4),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_match_search_is_empty_success() {
        let adapter = unconfigured();
        let result = adapter
            .search(ResourceKind::Media, "zzz-no-match")
            .await
            .unwrap();
        match result.payload {
            Payload::MediaItems(items) => assert!(items.is_empty()),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_detail_by_id() {
        let adapter = unconfigured();
        let result = adapter.detail(ResourceKind::Sessions, "s-002").await.unwrap();
        match result.payload {
            Payload::Sessions(sessions) => {
                assert_eq!(sessions.len(), 1);
                assert_eq!(sessions[0].user, "Bob");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_detail_unknown_id_is_not_found() {
        let adapter = unconfigured();
        let err = adapter
            .detail(ResourceKind::Sessions, "s-999")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_session_search_matches_user() {
        let adapter = unconfigured();
        let result = adapter
            .search(ResourceKind::Sessions, "alice")
            .await
            .unwrap();
        match result.payload {
            Payload::Sessions(sessions) => assert_eq!(sessions.len(), 1),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_session_without_playback_is_dropped() {
        let raw = EmbySession {
            id: "s-idle".to_string(),
            user_name: "Carol".to_string(),
            device_name: "TV".to_string(),
            now_playing_item: None,
        };
        assert!(raw.normalize().is_none());
    }
}
