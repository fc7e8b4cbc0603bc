use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {field}: '{value}'. Must be an http(s) URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Invalid ttl_hours: {0}. Must be at least 1")]
    InvalidTtl(u32),

    #[error("Cache path cannot be empty")]
    EmptyCachePath,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid zoom range: min_zoom ({0}) must not exceed max_zoom ({1})")]
    InvalidZoomRange(u8, u8),

    #[error("Invalid map center ({0}, {1}). Latitude must be within ±90, longitude within ±180")]
    InvalidCenter(f64, f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .dino-finder/config.yaml (project config)
    /// 3. .dino-finder/local.yaml (local overrides, optional)
    /// 4. Environment variables (DINO_FINDER_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".dino-finder/config.yaml"))
            .merge(Yaml::file(".dino-finder/local.yaml"))
            .merge(Env::prefixed("DINO_FINDER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("DINO_FINDER_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let endpoints = &config.endpoints;
        for (field, value) in [
            ("feed_url", &endpoints.feed_url),
            ("detail_url", &endpoints.detail_url),
            ("wiki_api_url", &endpoints.wiki_api_url),
            ("wiki_url", &endpoints.wiki_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }

        if config.cache.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCachePath);
        }

        if config.cache.ttl_hours == 0 {
            return Err(ConfigError::InvalidTtl(config.cache.ttl_hours));
        }

        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.http.timeout_secs));
        }

        let map = &config.map;
        if map.min_zoom > map.max_zoom {
            return Err(ConfigError::InvalidZoomRange(map.min_zoom, map.max_zoom));
        }

        if !(-90.0..=90.0).contains(&map.center_lat) || !(-180.0..=180.0).contains(&map.center_lng)
        {
            return Err(ConfigError::InvalidCenter(map.center_lat, map.center_lng));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{CacheConfig, MapConfig};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cache.ttl_hours, 24);
        assert_eq!(
            config.endpoints.detail_url,
            "https://paleobiodb.org/data1.2/occs/single.json"
        );
        assert_eq!(config.map.min_zoom, 5);
        assert_eq!(config.map.max_zoom, 15);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
endpoints:
  feed_url: http://localhost:8080/dinos
cache:
  path: /tmp/digs.json
  ttl_hours: 6
map:
  min_zoom: 3
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.endpoints.feed_url, "http://localhost:8080/dinos");
        assert_eq!(
            config.endpoints.wiki_url,
            "https://en.wikipedia.org/wiki",
            "unspecified endpoints keep defaults"
        );
        assert_eq!(config.cache.ttl_hours, 6);
        assert_eq!(config.map.min_zoom, 3);
        assert_eq!(config.map.max_zoom, 15);
        assert_eq!(config.logging.level, "debug");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default();
        config.endpoints.wiki_api_url = "ftp://example.org".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidUrl {
                field: "wiki_api_url",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let config = Config {
            cache: CacheConfig {
                ttl_hours: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTtl(0))
        ));
    }

    #[test]
    fn test_validate_zoom_range() {
        let config = Config {
            map: MapConfig {
                min_zoom: 16,
                max_zoom: 4,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidZoomRange(16, 4))
        ));
    }

    #[test]
    fn test_validate_center() {
        let config = Config {
            map: MapConfig {
                center_lat: 91.0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidCenter(..))
        ));
    }

    #[test]
    fn test_validate_logging() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  ttl_hours: 12\nhttp:\n  timeout_secs: 5").unwrap();

        temp_env::with_var("DINO_FINDER_CACHE__TTL_HOURS", Some("2"), || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.cache.ttl_hours, 2);
            assert_eq!(config.http.timeout_secs, 5);
        });
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  format: xml").unwrap();

        temp_env::with_vars_unset(["DINO_FINDER_LOGGING__FORMAT"], || {
            assert!(ConfigLoader::load_from_file(file.path()).is_err());
        });
    }
}
