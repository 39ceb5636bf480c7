pub mod aggregator;
pub mod error;
pub mod fetchers;
pub mod normalize;
pub mod sentiment;
pub mod traits;
pub mod views;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use aggregator::{AggregatorOptions, ArtistProfileAggregator, FetchFailure, ProfileSnapshot, Providers};
pub use error::{AggregatorError, Provider, Result};
pub use fetchers::{
    CatalogMetricsFetcher, EventListingsFetcher, IdentityResolver, SearchTrendFetcher,
    SocialSentimentFetcher, VideoChannelStatsFetcher,
};
pub use sentiment::{SentimentScorer, VaderScorer};
