//! Configuration snapshot for the HomeOps gateway.
//!
//! All settings come from environment variables, read exactly once at
//! process start. The snapshot is immutable afterwards: request handling
//! never re-reads the environment, and adapters receive only the subset
//! they need.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `HOMEOPS_ADMIN_KEY` | shared secret for the auth gate (required) |
//! | `DOCKER_API_URL` | Docker Engine API base URL (unset = mock mode) |
//! | `EMBY_URL` | Emby server base URL (unset = mock mode) |
//! | `EMBY_API_KEY` | Emby API key (unset = mock mode) |
//! | `LOG_LEVEL` | tracing filter directive (default `info`) |
//! | `HOMEOPS_LISTEN` | listen address (default `0.0.0.0:8000`) |
//! | `UPSTREAM_TIMEOUT_SECS` | per-upstream-call timeout (default `10`) |

use std::time::Duration;

use thiserror::Error;

/// Errors raised while building the configuration snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The admin key is mandatory; the gateway refuses to start without it
    /// rather than fall back to a well-known default secret.
    #[error("HOMEOPS_ADMIN_KEY is not set; refusing to start without an admin key")]
    MissingAdminKey,

    /// A variable was set but could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Docker adapter settings.
#[derive(Debug, Clone, Default)]
pub struct DockerConfig {
    /// Base URL of the Docker Engine API. `None` puts the adapter in
    /// mock mode.
    pub base_url: Option<String>,
}

/// Emby adapter settings.
#[derive(Debug, Clone, Default)]
pub struct EmbyConfig {
    /// Base URL of the Emby server. Mock mode unless both this and
    /// `api_key` are set.
    pub base_url: Option<String>,
    /// Emby API key.
    pub api_key: Option<String>,
}

/// The complete, immutable configuration snapshot.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Shared secret validated by the auth gate.
    pub admin_key: String,
    /// Docker adapter subset.
    pub docker: DockerConfig,
    /// Emby adapter subset.
    pub emby: EmbyConfig,
    /// Minimum log level, fed to the tracing filter at startup.
    pub log_level: String,
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
    /// Timeout applied to every upstream call.
    pub upstream_timeout_secs: u64,
}

impl GatewayConfig {
    /// Build the snapshot from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the snapshot from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests supply a closure over a map so
    /// they never mutate the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let admin_key = get("HOMEOPS_ADMIN_KEY")
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingAdminKey)?;

        let upstream_timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "UPSTREAM_TIMEOUT_SECS".to_string(),
                value: raw,
            })?,
            None => default_upstream_timeout_secs(),
        };

        Ok(Self {
            admin_key,
            docker: DockerConfig {
                base_url: get("DOCKER_API_URL").filter(|v| !v.is_empty()),
            },
            emby: EmbyConfig {
                base_url: get("EMBY_URL").filter(|v| !v.is_empty()),
                api_key: get("EMBY_API_KEY").filter(|v| !v.is_empty()),
            },
            log_level: get("LOG_LEVEL").unwrap_or_else(default_log_level),
            listen_addr: get("HOMEOPS_LISTEN").unwrap_or_else(default_listen_addr),
            upstream_timeout_secs,
        })
    }

    /// Timeout applied to each upstream call as a [`Duration`].
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_admin_key_is_an_error() {
        let vars = env(&[]);
        let result = GatewayConfig::from_lookup(|k| vars.get(k).cloned());
        assert!(matches!(result, Err(ConfigError::MissingAdminKey)));
    }

    #[test]
    fn test_empty_admin_key_is_an_error() {
        let vars = env(&[("HOMEOPS_ADMIN_KEY", "")]);
        let result = GatewayConfig::from_lookup(|k| vars.get(k).cloned());
        assert!(matches!(result, Err(ConfigError::MissingAdminKey)));
    }

    #[test]
    fn test_defaults_apply_when_only_admin_key_is_set() {
        let vars = env(&[("HOMEOPS_ADMIN_KEY", "secret")]);
        let config = GatewayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.admin_key, "secret");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.listen_addr, "0.0.0.0:8000");
        assert_eq!(config.upstream_timeout_secs, 10);
        assert!(config.docker.base_url.is_none());
        assert!(config.emby.base_url.is_none());
        assert!(config.emby.api_key.is_none());
    }

    #[test]
    fn test_adapter_sections_are_populated() {
        let vars = env(&[
            ("HOMEOPS_ADMIN_KEY", "secret"),
            ("DOCKER_API_URL", "http://localhost:2375"),
            ("EMBY_URL", "http://nas:8096"),
            ("EMBY_API_KEY", "emby-key"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]);
        let config = GatewayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.docker.base_url.as_deref(), Some("http://localhost:2375"));
        assert_eq!(config.emby.base_url.as_deref(), Some("http://nas:8096"));
        assert_eq!(config.emby.api_key.as_deref(), Some("emby-key"));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let vars = env(&[
            ("HOMEOPS_ADMIN_KEY", "secret"),
            ("UPSTREAM_TIMEOUT_SECS", "soon"),
        ]);
        let result = GatewayConfig::from_lookup(|k| vars.get(k).cloned());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_adapter_urls_mean_unconfigured() {
        let vars = env(&[
            ("HOMEOPS_ADMIN_KEY", "secret"),
            ("DOCKER_API_URL", ""),
            ("EMBY_URL", ""),
        ]);
        let config = GatewayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(config.docker.base_url.is_none());
        assert!(config.emby.base_url.is_none());
    }
}
