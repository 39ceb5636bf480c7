use std::sync::Arc;

use artistpulse_common::{ArtistIdentity, EventRecord, Table};
use tracing::{debug, error};

use crate::normalize;
use crate::traits::EventsProvider;

/// Maximum events requested per query.
pub const EVENT_PAGE_SIZE: u32 = 10;

/// Upcoming live events matching the artist name.
///
/// This fetcher never fails: any provider error is logged and the result is
/// an empty table, regardless of the configured failure policy.
pub struct EventListingsFetcher {
    provider: Arc<dyn EventsProvider>,
}

impl EventListingsFetcher {
    pub fn new(provider: Arc<dyn EventsProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch(&self, identity: &ArtistIdentity) -> Table<EventRecord> {
        match self.provider.find_events(&identity.name, EVENT_PAGE_SIZE).await {
            Ok(events) => {
                debug!(artist = identity.name.as_str(), count = events.len(), "Fetched events");
                events
                    .into_iter()
                    .take(EVENT_PAGE_SIZE as usize)
                    .map(normalize::event_record)
                    .collect::<Vec<_>>()
                    .into()
            }
            Err(e) => {
                error!(artist = identity.name.as_str(), error = %e, "Error fetching events");
                Table::empty()
            }
        }
    }
}
