use std::sync::Arc;

use artistpulse_common::{ArtistIdentity, FailurePolicy, Table, TrackRecord};
use tracing::debug;

use crate::error::{settle, AggregatorError, Provider, Result};
use crate::normalize;
use crate::traits::CatalogProvider;

/// Top-track popularity for the resolved catalog artist. Provider order is
/// kept; callers wanting "top N by popularity" sort for themselves.
pub struct CatalogMetricsFetcher {
    provider: Arc<dyn CatalogProvider>,
    policy: FailurePolicy,
}

impl CatalogMetricsFetcher {
    pub fn new(provider: Arc<dyn CatalogProvider>, policy: FailurePolicy) -> Self {
        Self { provider, policy }
    }

    pub async fn fetch(&self, identity: &ArtistIdentity) -> Result<Table<TrackRecord>> {
        let Some(catalog_id) = identity.catalog_id.as_deref() else {
            debug!(artist = identity.name.as_str(), "No catalog identity, skipping top tracks");
            return Ok(Table::empty());
        };
        settle(self.policy, self.fetch_tracks(catalog_id).await)
    }

    async fn fetch_tracks(&self, catalog_id: &str) -> Result<Table<TrackRecord>> {
        let tracks = self
            .provider
            .top_tracks(catalog_id)
            .await
            .map_err(|e| AggregatorError::provider_call(Provider::Catalog, e))?;
        debug!(catalog_id, count = tracks.len(), "Fetched top tracks");
        Ok(tracks.into_iter().map(normalize::track_record).collect::<Vec<_>>().into())
    }
}
