use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a fetcher treats a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the error and return an empty table.
    #[default]
    Degrade,
    /// Return the typed error to the caller.
    Propagate,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "propagate" => Ok(Self::Propagate),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrade => write!(f, "degrade"),
            Self::Propagate => write!(f, "propagate"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Provider credentials are opaque secrets fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    // Catalog (Spotify)
    pub spotify_client_id: String,
    pub spotify_client_secret: String,

    // Forum (Reddit)
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,

    // Video (YouTube)
    pub youtube_api_key: String,

    // Events (Ticketmaster)
    pub ticketmaster_api_key: String,

    // Behaviour
    pub failure_policy: FailurePolicy,
    pub forum_thread_concurrency: usize,
    pub http_timeout: Duration,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

pub const DEFAULT_REDDIT_USER_AGENT: &str = "artist-analytics/1.0";
pub const DEFAULT_FORUM_THREAD_CONCURRENCY: usize = 4;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            reddit_client_id: required("REDDIT_CLIENT_ID")?,
            reddit_client_secret: required("REDDIT_CLIENT_SECRET")?,
            reddit_user_agent: get("REDDIT_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_REDDIT_USER_AGENT.to_string()),
            youtube_api_key: required("YOUTUBE_API_KEY")?,
            ticketmaster_api_key: required("TICKETMASTER_API_KEY")?,
            failure_policy: parse_or("ARTIST_PULSE_FAILURE_POLICY", get("ARTIST_PULSE_FAILURE_POLICY"), FailurePolicy::Degrade)?,
            forum_thread_concurrency: parse_or(
                "ARTIST_PULSE_FORUM_CONCURRENCY",
                get("ARTIST_PULSE_FORUM_CONCURRENCY"),
                DEFAULT_FORUM_THREAD_CONCURRENCY,
            )?
            .max(1),
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            api_host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: parse_or("API_PORT", get("API_PORT"), 3000)?,
        })
    }

    pub fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let head: String = val.chars().take(5).collect();
            format!("{head}...({} chars)", val.chars().count())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  SPOTIFY_CLIENT_ID: {}", preview(&self.spotify_client_id));
        tracing::info!("  SPOTIFY_CLIENT_SECRET: {}", preview(&self.spotify_client_secret));
        tracing::info!("  REDDIT_CLIENT_ID: {}", preview(&self.reddit_client_id));
        tracing::info!("  REDDIT_CLIENT_SECRET: {}", preview(&self.reddit_client_secret));
        tracing::info!("  YOUTUBE_API_KEY: {}", preview(&self.youtube_api_key));
        tracing::info!("  TICKETMASTER_API_KEY: {}", preview(&self.ticketmaster_api_key));
        tracing::info!("  failure_policy: {}", self.failure_policy);
        tracing::info!("  forum_thread_concurrency: {}", self.forum_thread_concurrency);
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
