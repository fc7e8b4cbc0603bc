use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for dino-finder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote endpoints
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Persisted feed snapshot
    #[serde(default)]
    pub cache: CacheConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Initial view and marker zoom range
    #[serde(default)]
    pub map: MapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointsConfig {
    /// Dig-site feed returning a JSON array
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Occurrence detail lookup, queried with `?id=<local-id>`
    #[serde(default = "default_detail_url")]
    pub detail_url: String,

    /// Encyclopedia HTML API, queried with `/<title>`
    #[serde(default = "default_wiki_api_url")]
    pub wiki_api_url: String,

    /// Base of absolute article links
    #[serde(default = "default_wiki_url")]
    pub wiki_url: String,
}

fn default_feed_url() -> String {
    "https://us-central1-dino-finder-362009.cloudfunctions.net/api/dinos".to_string()
}

fn default_detail_url() -> String {
    "https://paleobiodb.org/data1.2/occs/single.json".to_string()
}

fn default_wiki_api_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/html".to_string()
}

fn default_wiki_url() -> String {
    "https://en.wikipedia.org/wiki".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            detail_url: default_detail_url(),
            wiki_api_url: default_wiki_api_url(),
            wiki_url: default_wiki_url(),
        }
    }
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// File holding the single snapshot slot
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,

    /// Hours a snapshot stays valid
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(".dino-finder/digs.json")
}

const fn default_ttl_hours() -> u32 {
    24
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("dino-finder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Map view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Lowest zoom level at which markers are shown
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,

    /// Highest zoom level at which markers are shown
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

const fn default_center_lat() -> f64 {
    48.0
}

const fn default_center_lng() -> f64 {
    16.0
}

const fn default_min_zoom() -> u8 {
    5
}

const fn default_max_zoom() -> u8 {
    15
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for daily-rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
