use super::models::RawEvent;
use super::parser::parse_calendar;
use super::EventSource;
use crate::config::Config;
use crate::error::{fetch_error, CalendarResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Remote iCalendar document, fetched and parsed in full on every call
#[derive(Debug, Clone)]
pub struct IcsFeed {
    url: Url,
    client: Client,
}

impl IcsFeed {
    /// Create a feed reader with the given request timeout
    pub fn new(url: Url, timeout: Duration) -> CalendarResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { url, client })
    }

    /// Create a feed reader from the application config
    pub fn from_config(config: &Config) -> CalendarResult<Self> {
        Self::new(config.ics_url.clone(), config.fetch_timeout())
    }

    /// The document location
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn download(&self) -> CalendarResult<String> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(&format!("Failed to fetch calendar: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(fetch_error(&format!(
                "Failed to fetch calendar: HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(&format!("Failed to read calendar body: {}", e.without_url())))
    }
}

#[async_trait]
impl EventSource for IcsFeed {
    async fn fetch_events(&self) -> CalendarResult<Vec<RawEvent>> {
        // Private feed URLs embed a token, so only the host is logged
        debug!(
            "Fetching calendar from {}",
            self.url.host_str().unwrap_or("<no host>")
        );
        let body = self.download().await?;
        let events = parse_calendar(&body)?;
        info!("Fetched {} events ({} bytes)", events.len(), body.len());
        Ok(events)
    }
}
