use std::sync::Arc;

use artistpulse_common::{ArtistIdentity, FailurePolicy};
use tracing::{debug, info, warn};

use crate::error::{AggregatorError, Provider, Result};
use crate::traits::{CatalogProvider, VideoProvider};

/// Channel search is capped to the single best hit.
const VIDEO_SEARCH_MAX_RESULTS: u32 = 1;

/// Maps a free-text artist name onto catalog and video identities.
///
/// The two lookups are deliberately asymmetric: the catalog artist is the
/// dashboard's subject, so finding none is fatal; the video channel is
/// supplementary and may be absent.
pub struct IdentityResolver {
    catalog: Arc<dyn CatalogProvider>,
    video: Arc<dyn VideoProvider>,
    policy: FailurePolicy,
}

impl IdentityResolver {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        video: Arc<dyn VideoProvider>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            catalog,
            video,
            policy,
        }
    }

    pub async fn resolve(&self, artist_name: &str) -> Result<ArtistIdentity> {
        if artist_name.trim().is_empty() {
            return Err(AggregatorError::InvalidArtistName(artist_name.to_string()));
        }

        let (catalog, video) = tokio::join!(
            self.resolve_catalog(artist_name),
            self.resolve_video(artist_name)
        );
        let (catalog_id, followers) = catalog?;
        let video_channel_id = video?;

        info!(
            artist = artist_name,
            catalog_id = catalog_id.as_str(),
            video_channel = video_channel_id.as_deref().unwrap_or("<none>"),
            "Resolved artist identity"
        );

        let mut identity = ArtistIdentity::unresolved(artist_name).with_catalog(catalog_id, followers);
        if let Some(channel) = video_channel_id {
            identity = identity.with_video_channel(channel);
        }
        Ok(identity)
    }

    /// First catalog hit. Always fatal on failure, whatever the policy: no
    /// identity can be built without it.
    async fn resolve_catalog(&self, artist_name: &str) -> Result<(String, Option<u64>)> {
        let hits = self
            .catalog
            .search_artists(artist_name)
            .await
            .map_err(|e| AggregatorError::provider_call(Provider::Catalog, e))?;

        let first = hits
            .into_iter()
            .next()
            .ok_or_else(|| AggregatorError::IdentityNotFound(artist_name.to_string()))?;
        Ok((first.id, first.followers))
    }

    async fn resolve_video(&self, artist_name: &str) -> Result<Option<String>> {
        match self
            .video
            .search_channels(artist_name, VIDEO_SEARCH_MAX_RESULTS)
            .await
        {
            Ok(hits) => {
                let channel = hits.into_iter().next().map(|c| c.channel_id);
                if channel.is_none() {
                    debug!(artist = artist_name, "No video channel found");
                }
                Ok(channel)
            }
            Err(e) => match self.policy {
                FailurePolicy::Degrade => {
                    warn!(provider = %Provider::Video, error = %e, "Channel search failed, continuing without channel");
                    Ok(None)
                }
                FailurePolicy::Propagate => Err(AggregatorError::provider_call(Provider::Video, e)),
            },
        }
    }
}
