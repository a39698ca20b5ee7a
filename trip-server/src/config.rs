//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::mapbox::MapboxConfig;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Default Mapbox API base URL.
const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com";

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Default provider request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default limit on concurrent Mapbox requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("MAPBOX_API_KEY must be set unless TRIP_FIXTURE_DIR is used")]
    MissingApiKey,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where routes and place names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSource {
    /// Live Mapbox APIs.
    Mapbox { api_key: String },

    /// Canned responses loaded from a fixture directory.
    Fixture { dir: PathBuf },
}

/// Configuration for the trip server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub provider: ProviderSource,
    pub static_dir: PathBuf,
    pub timeout_secs: u64,
    pub max_concurrent: usize,
    pub mapbox_base_url: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr_value = get("TRIP_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "TRIP_SERVER_ADDR",
                value: addr_value.clone(),
            })?;

        let timeout_secs = match get("PROVIDER_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "PROVIDER_TIMEOUT_SECS",
                        value,
                    });
                }
            },
        };

        let max_concurrent = match get("MAPBOX_MAX_CONCURRENT") {
            None => DEFAULT_MAX_CONCURRENT,
            Some(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "MAPBOX_MAX_CONCURRENT",
                        value,
                    });
                }
            },
        };

        let provider = match (get("TRIP_FIXTURE_DIR"), get("MAPBOX_API_KEY")) {
            (Some(dir), _) => ProviderSource::Fixture { dir: dir.into() },
            (None, Some(api_key)) => ProviderSource::Mapbox { api_key },
            (None, None) => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            addr,
            provider,
            static_dir: get("TRIP_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            timeout_secs,
            max_concurrent,
            mapbox_base_url: get("MAPBOX_BASE_URL")
                .unwrap_or_else(|| DEFAULT_MAPBOX_BASE_URL.to_string()),
        })
    }

    /// Mapbox client configuration, if the live provider is selected.
    pub fn mapbox_config(&self) -> Option<MapboxConfig> {
        match &self.provider {
            ProviderSource::Mapbox { api_key } => Some(
                MapboxConfig::new(api_key)
                    .with_base_url(&self.mapbox_base_url)
                    .with_timeout(self.timeout_secs)
                    .with_max_concurrent(self.max_concurrent),
            ),
            ProviderSource::Fixture { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_api_key() {
        let config = config_from(&[("MAPBOX_API_KEY", "pk.test")]).unwrap();

        assert_eq!(config.addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(
            config.provider,
            ProviderSource::Mapbox {
                api_key: "pk.test".to_string()
            }
        );
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.mapbox_base_url, "https://api.mapbox.com");
    }

    #[test]
    fn missing_api_key_is_error() {
        assert_eq!(config_from(&[]), Err(ConfigError::MissingApiKey));
        assert_eq!(
            config_from(&[("MAPBOX_API_KEY", "   ")]),
            Err(ConfigError::MissingApiKey)
        );
    }

    #[test]
    fn fixture_dir_selects_fixture_provider() {
        let config = config_from(&[
            ("TRIP_FIXTURE_DIR", "fixtures/austin"),
            ("MAPBOX_API_KEY", "pk.test"),
        ])
        .unwrap();

        assert_eq!(
            config.provider,
            ProviderSource::Fixture {
                dir: PathBuf::from("fixtures/austin")
            }
        );
        assert!(config.mapbox_config().is_none());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("MAPBOX_API_KEY", "pk.test"),
            ("MAPBOX_BASE_URL", "http://localhost:9000"),
            ("TRIP_SERVER_ADDR", "0.0.0.0:3000"),
            ("TRIP_STATIC_DIR", "/srv/static"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("MAPBOX_MAX_CONCURRENT", "2"),
        ])
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));

        let mapbox = config.mapbox_config().unwrap();
        assert_eq!(mapbox.api_key, "pk.test");
        assert_eq!(mapbox.base_url, "http://localhost:9000");
        assert_eq!(mapbox.timeout_secs, 5);
        assert_eq!(mapbox.max_concurrent, 2);
    }

    #[test]
    fn invalid_values() {
        let err = config_from(&[("MAPBOX_API_KEY", "pk"), ("TRIP_SERVER_ADDR", "localhost")])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "TRIP_SERVER_ADDR",
                value: "localhost".to_string()
            }
        );

        for bad in ["0", "-1", "soon"] {
            let err = config_from(&[("MAPBOX_API_KEY", "pk"), ("PROVIDER_TIMEOUT_SECS", bad)])
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    key: "PROVIDER_TIMEOUT_SECS",
                    ..
                }
            ));
        }

        let err = config_from(&[("MAPBOX_API_KEY", "pk"), ("MAPBOX_MAX_CONCURRENT", "0")])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "MAPBOX_MAX_CONCURRENT",
                ..
            }
        ));
    }
}
