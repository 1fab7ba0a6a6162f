//! Engine configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Which `SessionRepo` backend to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStoreKind {
    Sqlite,
    Memory,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Prefix for the `post_url` of every frame.
    pub public_base_url: Url,
    pub session_store: SessionStoreKind,
    pub session_db: String,
    /// When set, sloot is fetched over HTTP instead of derived locally.
    pub sloot_api_url: Option<Url>,
    pub asset_dir: PathBuf,
    pub upstream_timeout: Duration,
    pub provider_max_retries: u32,
    pub display_utc_offset_hours: i32,
    pub log_dir: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let server_host = var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("SERVER_PORT", &raw, e))?,
            None => 3000,
        };

        let base_raw = var("PUBLIC_BASE_URL").unwrap_or_else(|| "http://localhost:3000".into());
        let public_base_url = Url::parse(base_raw.trim_end_matches('/'))
            .map_err(|e| ConfigError::invalid("PUBLIC_BASE_URL", &base_raw, e))?;

        let session_store = match var("SESSION_STORE").as_deref().map(str::trim) {
            None | Some("sqlite") => SessionStoreKind::Sqlite,
            Some("memory") => SessionStoreKind::Memory,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "SESSION_STORE",
                    other,
                    "expected 'sqlite' or 'memory'",
                ))
            }
        };

        let sloot_api_url = match var("SLOOT_API_URL") {
            Some(raw) => Some(
                Url::parse(raw.trim_end_matches('/'))
                    .map_err(|e| ConfigError::invalid("SLOOT_API_URL", &raw, e))?,
            ),
            None => None,
        };

        let upstream_timeout_ms: u64 =
            parse_or("UPSTREAM_TIMEOUT_MS", var("UPSTREAM_TIMEOUT_MS"), 10_000)?;
        if upstream_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "UPSTREAM_TIMEOUT_MS",
                "0",
                "timeout must be positive",
            ));
        }

        Ok(Self {
            server_host,
            server_port,
            public_base_url,
            session_store,
            session_db: var("SESSION_DB").unwrap_or_else(|| "sessions.db".into()),
            sloot_api_url,
            asset_dir: PathBuf::from(var("ASSET_DIR").unwrap_or_else(|| "./static/asset".into())),
            upstream_timeout: Duration::from_millis(upstream_timeout_ms),
            provider_max_retries: parse_or("PROVIDER_MAX_RETRIES", var("PROVIDER_MAX_RETRIES"), 2)?,
            display_utc_offset_hours: parse_or(
                "DISPLAY_UTC_OFFSET_HOURS",
                var("DISPLAY_UTC_OFFSET_HOURS"),
                8,
            )?,
            log_dir: var("LOG_DIR").map(PathBuf::from),
        })
    }

    /// Absolute URL of a frame endpoint such as `/explore`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid(name, &raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.session_store, SessionStoreKind::Sqlite);
        assert_eq!(config.session_db, "sessions.db");
        assert!(config.sloot_api_url.is_none());
        assert_eq!(config.upstream_timeout, Duration::from_millis(10_000));
        assert_eq!(config.provider_max_retries, 2);
        assert_eq!(config.display_utc_offset_hours, 8);
        assert_eq!(config.endpoint("/explore"), "http://localhost:3000/explore");
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = config_from(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let base = "https://vanishk.xyz/games/frame-survivor/";
        let config = config_from(&[("PUBLIC_BASE_URL", base)]).unwrap();
        assert_eq!(
            config.endpoint("battle"),
            "https://vanishk.xyz/games/frame-survivor/battle"
        );
    }

    #[test]
    fn rejects_unknown_store_and_bad_numbers() {
        assert!(config_from(&[("SESSION_STORE", "redis")]).is_err());
        assert!(config_from(&[("UPSTREAM_TIMEOUT_MS", "soon")]).is_err());
        assert!(config_from(&[("UPSTREAM_TIMEOUT_MS", "0")]).is_err());
        assert!(config_from(&[("PUBLIC_BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn memory_store_is_selectable() {
        let config = config_from(&[("SESSION_STORE", "memory")]).unwrap();
        assert_eq!(config.session_store, SessionStoreKind::Memory);
    }
}
