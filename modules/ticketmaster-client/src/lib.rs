pub mod error;
pub mod types;

pub use error::{Result, TicketmasterError};
pub use types::{City, Event, Venue};

use std::time::Duration;

use types::EventSearchResponse;

const BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

pub struct TicketmasterClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TicketmasterClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Keyword search over upcoming events, first page of `size` results.
    pub async fn find_events(&self, keyword: &str, size: u32) -> Result<Vec<Event>> {
        tracing::debug!(keyword, size, "ticketmaster: searching events");
        let url = format!("{}/events.json", self.base_url);
        let size = size.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("keyword", keyword),
                ("size", size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TicketmasterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let parsed: EventSearchResponse = serde_json::from_str(&body)?;
        let events = parsed.into_events();
        tracing::debug!(count = events.len(), "ticketmaster: events returned");
        Ok(events)
    }
}
