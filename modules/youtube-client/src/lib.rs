pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{Channel, ChannelStatistics, SearchResult};

use std::time::Duration;

use serde::de::DeserializeOwned;
use types::ListResponse;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
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

    /// Search channels by name, returning at most `max_results` hits.
    pub async fn search_channels(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        tracing::debug!(query, max_results, "youtube: searching channels");
        let max = max_results.to_string();
        let resp: ListResponse<SearchResult> = self
            .get_json(
                "search",
                &[
                    ("q", query),
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("maxResults", &max),
                ],
            )
            .await?;
        Ok(resp.items)
    }

    /// Statistics for a single channel id. `None` when the id matches nothing.
    pub async fn channel_statistics(&self, channel_id: &str) -> Result<Option<ChannelStatistics>> {
        tracing::debug!(channel_id, "youtube: fetching channel statistics");
        let resp: ListResponse<Channel> = self
            .get_json("channels", &[("part", "statistics"), ("id", channel_id)])
            .await?;
        Ok(resp
            .items
            .into_iter()
            .next()
            .map(|c| c.statistics.unwrap_or_default()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
