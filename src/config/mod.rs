//! Configuration module for the parish site.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_AUTOPLAY_SECS: u64 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for the admin console (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory holding uploaded media
    pub media_dir: PathBuf,
    /// Base URL under which `/media` is publicly reachable
    pub public_base_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Carousel autoplay period
    pub autoplay_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables, logging a warning for
    /// each value that fell back to its default.
    pub fn from_env() -> Self {
        let (config, warnings) = Self::from_env_with_warnings();
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        config
    }

    /// Log level alone, so the subscriber can be installed before the rest
    /// of the configuration is read.
    pub fn log_level_from_env() -> String {
        dotenvy::dotenv().ok();
        env::var("PARISH_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
    }

    /// Load configuration and return the fallback warnings instead of
    /// logging them.
    pub fn from_env_with_warnings() -> (Self, Vec<String>) {
        dotenvy::dotenv().ok();
        let mut warnings = Vec::new();

        let api_psk = env::var("PARISH_API_PSK").ok().filter(|k| !k.is_empty());

        let db_path = env::var("PARISH_DB_PATH")
            .unwrap_or_else(|_| "./data/parish.sqlite".to_string())
            .into();

        let media_dir = env::var("PARISH_MEDIA_DIR")
            .unwrap_or_else(|_| "./data/media".to_string())
            .into();

        let bind_addr = match env::var("PARISH_BIND_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Invalid PARISH_BIND_ADDR {:?}, using {}",
                    raw, DEFAULT_BIND_ADDR
                ));
                default_bind_addr()
            }),
            Err(_) => default_bind_addr(),
        };

        let public_base_url = env::var("PARISH_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}", bind_addr))
            .trim_end_matches('/')
            .to_string();

        let log_level = Self::log_level_from_env();

        let autoplay_secs = match env::var("PARISH_AUTOPLAY_SECS") {
            Ok(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).unwrap_or_else(|| {
                warnings.push(format!(
                    "Invalid PARISH_AUTOPLAY_SECS {:?}, using {}",
                    raw, DEFAULT_AUTOPLAY_SECS
                ));
                DEFAULT_AUTOPLAY_SECS
            }),
            Err(_) => DEFAULT_AUTOPLAY_SECS,
        };

        let config = Self {
            api_psk,
            db_path,
            media_dir,
            public_base_url,
            bind_addr,
            log_level,
            autoplay_interval: Duration::from_secs(autoplay_secs),
        };

        (config, warnings)
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}
