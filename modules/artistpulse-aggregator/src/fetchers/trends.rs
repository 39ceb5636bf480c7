use std::sync::Arc;

use artistpulse_common::{ArtistIdentity, FailurePolicy, Table, TrendPoint};
use tracing::debug;

use crate::error::{settle, AggregatorError, Provider, Result};
use crate::normalize;
use crate::traits::TrendsProvider;

/// Relative search interest over the trailing three months, one row per
/// bucket with the bucket date as an explicit column.
pub struct SearchTrendFetcher {
    provider: Arc<dyn TrendsProvider>,
    policy: FailurePolicy,
}

impl SearchTrendFetcher {
    pub fn new(provider: Arc<dyn TrendsProvider>, policy: FailurePolicy) -> Self {
        Self { provider, policy }
    }

    pub async fn fetch(&self, identity: &ArtistIdentity) -> Result<Table<TrendPoint>> {
        settle(self.policy, self.fetch_series(&identity.name).await)
    }

    async fn fetch_series(&self, keyword: &str) -> Result<Table<TrendPoint>> {
        let points = self
            .provider
            .interest_over_time(keyword, trends_client::TIMEFRAME_THREE_MONTHS)
            .await
            .map_err(|e| AggregatorError::provider_call(Provider::Trends, e))?;
        debug!(keyword, count = points.len(), "Fetched interest series");
        Ok(points.into_iter().map(normalize::trend_point).collect::<Vec<_>>().into())
    }
}
