use std::sync::Arc;

use artistpulse_common::{ArtistIdentity, ChannelStats, FailurePolicy, Table};
use tracing::debug;

use crate::error::{settle, AggregatorError, Provider, Result};
use crate::normalize;
use crate::traits::VideoProvider;

/// Aggregate channel counters: one row, or none when no channel resolved.
pub struct VideoChannelStatsFetcher {
    provider: Arc<dyn VideoProvider>,
    policy: FailurePolicy,
}

impl VideoChannelStatsFetcher {
    pub fn new(provider: Arc<dyn VideoProvider>, policy: FailurePolicy) -> Self {
        Self { provider, policy }
    }

    pub async fn fetch(&self, identity: &ArtistIdentity) -> Result<Table<ChannelStats>> {
        let Some(channel_id) = identity.video_channel_id.as_deref() else {
            debug!(artist = identity.name.as_str(), "No video channel, skipping statistics");
            return Ok(Table::empty());
        };
        settle(self.policy, self.fetch_stats(channel_id).await)
    }

    async fn fetch_stats(&self, channel_id: &str) -> Result<Table<ChannelStats>> {
        let raw = self
            .provider
            .channel_statistics(channel_id)
            .await
            .map_err(|e| AggregatorError::provider_call(Provider::Video, e))?;

        match raw {
            Some(raw) => Ok(Table::new(vec![normalize::channel_stats(&raw)?])),
            None => {
                debug!(channel_id, "Channel has no statistics item");
                Ok(Table::empty())
            }
        }
    }
}
