use crate::error::{config_error, env_error, CalendarResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default locale for tool output
pub const DEFAULT_LOCALE: &str = "en";

/// Default HTTP timeout for a single feed fetch, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Optional settings file, overridden by environment variables
pub const CONFIG_FILE: &str = "config/calendar.toml";

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the iCalendar document
    pub ics_url: Url,
    /// Locale used for headers, labels and weekday names
    pub locale: String,
    /// Timeout applied to every feed fetch
    pub fetch_timeout_secs: u64,
}

/// Settings that may be provided through `config/calendar.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub locale: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> CalendarResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file_config = if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)?;
            toml::from_str::<FileConfig>(&content)?
        } else {
            FileConfig::default()
        };

        Self::from_sources(|key| env::var(key).ok(), file_config)
    }

    /// Build the configuration from a variable lookup and file settings
    pub fn from_sources<F>(lookup: F, file_config: FileConfig) -> CalendarResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Required
        let raw_url = lookup("ICS_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| env_error("ICS_URL"))?;
        let ics_url = parse_feed_url(&raw_url)?;

        let locale = lookup("CALENDAR_LOCALE")
            .or(file_config.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let fetch_timeout_secs = match lookup("FETCH_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| config_error("Invalid FETCH_TIMEOUT_SECS format"))?,
            None => file_config
                .fetch_timeout_secs
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        };
        if fetch_timeout_secs == 0 {
            return Err(config_error("FETCH_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Config {
            ics_url,
            locale,
            fetch_timeout_secs,
        })
    }

    /// Timeout for a single feed fetch
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Parse the feed location, accepting `webcal://` links as HTTPS
fn parse_feed_url(raw: &str) -> CalendarResult<Url> {
    let raw = raw.trim();
    let normalized = match raw.strip_prefix("webcal://") {
        Some(rest) => format!("https://{}", rest),
        None => raw.to_string(),
    };

    let url = Url::parse(&normalized)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(config_error(&format!(
            "Unsupported ICS_URL scheme '{}', expected http, https or webcal",
            other
        ))),
    }
}
