// One fetcher per upstream provider. Each holds its injected provider handle
// and returns a fresh table per call; none keeps state between calls.

mod catalog;
mod events;
mod identity;
mod social;
mod trends;
mod video;

pub use catalog::CatalogMetricsFetcher;
pub use events::{EventListingsFetcher, EVENT_PAGE_SIZE};
pub use identity::IdentityResolver;
pub use social::{SocialSentimentFetcher, THREAD_SEARCH_LIMIT};
pub use trends::SearchTrendFetcher;
pub use video::VideoChannelStatsFetcher;
