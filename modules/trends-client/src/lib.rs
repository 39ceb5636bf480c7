pub mod error;
pub mod types;

pub use error::{Result, TrendsError};
pub use types::InterestPoint;

use std::time::Duration;

use serde::de::DeserializeOwned;
use types::{strip_xssi, ComparisonItem, ExploreRequest, ExploreResponse, MultilineResponse};

const BASE_URL: &str = "https://trends.google.com";

/// Trailing three months, Google's own timeframe syntax.
pub const TIMEFRAME_THREE_MONTHS: &str = "today 3-m";

const TIMESERIES_WIDGET: &str = "TIMESERIES";

pub struct TrendsClient {
    client: reqwest::Client,
    base_url: String,
    hl: String,
    tz: i32,
}

impl TrendsClient {
    /// `hl` is the interface language (`en-US`), `tz` the offset in minutes
    /// Google uses to bucket days (`360` = UTC-6).
    pub fn new(hl: &str, tz: i32, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            hl: hl.to_string(),
            tz,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Interest over time for a single keyword.
    pub async fn interest_over_time(&self, keyword: &str, timeframe: &str) -> Result<Vec<InterestPoint>> {
        tracing::debug!(keyword, timeframe, "trends: building payload");
        self.prime_cookies().await;

        let explore_req = ExploreRequest {
            comparison_item: vec![ComparisonItem {
                keyword: keyword.to_string(),
                time: timeframe.to_string(),
                geo: String::new(),
            }],
            category: 0,
            property: String::new(),
        };
        let explore: ExploreResponse = self
            .get_guarded(
                "trends/api/explore",
                &[("req", serde_json::to_string(&explore_req)?)],
            )
            .await?;

        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id == TIMESERIES_WIDGET)
            .ok_or(TrendsError::MissingWidget(TIMESERIES_WIDGET))?;
        let token = widget
            .token
            .ok_or(TrendsError::MissingWidget(TIMESERIES_WIDGET))?;

        let multiline: MultilineResponse = self
            .get_guarded(
                "trends/api/widgetdata/multiline",
                &[
                    ("req", serde_json::to_string(&widget.request)?),
                    ("token", token),
                ],
            )
            .await?;

        let points = multiline
            .default
            .timeline_data
            .into_iter()
            .map(|p| p.into_interest())
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = points.len(), "trends: interest series returned");
        Ok(points)
    }

    /// Google hands out the NID cookie on the landing page; later API calls
    /// are throttled hard without it. Failure here is not fatal.
    async fn prime_cookies(&self) {
        let url = format!("{}/?geo=US", self.base_url);
        if let Err(e) = self.client.get(&url).send().await {
            tracing::debug!(error = %e, "trends: cookie priming failed");
        }
    }

    async fn get_guarded<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let tz = self.tz.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[("hl", self.hl.as_str()), ("tz", tz.as_str())])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TrendsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(strip_xssi(&body))?)
    }
}
