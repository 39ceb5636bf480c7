use std::sync::Arc;

use anyhow::Context;
use artistpulse_common::{
    ArtistIdentity, ChannelStats, CommentRecord, Config, EventRecord, FailurePolicy, Record,
    Table, TrackRecord, TrendPoint,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use reddit_client::RedditClient;
use spotify_client::SpotifyClient;
use ticketmaster_client::TicketmasterClient;
use trends_client::TrendsClient;
use youtube_client::YouTubeClient;

use crate::error::{Provider, Result};
use crate::fetchers::{
    CatalogMetricsFetcher, EventListingsFetcher, IdentityResolver, SearchTrendFetcher,
    SocialSentimentFetcher, VideoChannelStatsFetcher,
};
use crate::sentiment::{SentimentScorer, VaderScorer};
use crate::traits::{CatalogProvider, EventsProvider, ForumProvider, TrendsProvider, VideoProvider};

/// Interface language and timezone offset (minutes) sent to the trends provider.
const TRENDS_HL: &str = "en-US";
const TRENDS_TZ: i32 = 360;

/// Explicitly constructed provider handles, shared by every fetcher.
#[derive(Clone, TypedBuilder)]
pub struct Providers {
    pub catalog: Arc<dyn CatalogProvider>,
    pub video: Arc<dyn VideoProvider>,
    pub forum: Arc<dyn ForumProvider>,
    pub events: Arc<dyn EventsProvider>,
    pub trends: Arc<dyn TrendsProvider>,
    #[builder(default = Arc::new(VaderScorer::new()) as Arc<dyn SentimentScorer>)]
    pub sentiment: Arc<dyn SentimentScorer>,
}

impl Providers {
    /// Build real HTTP clients from configured credentials.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.http_timeout;

        let spotify = SpotifyClient::new(
            config.spotify_client_id.clone(),
            config.spotify_client_secret.clone(),
            timeout,
        )
        .context("building catalog client")?;
        let youtube = YouTubeClient::new(config.youtube_api_key.clone(), timeout)
            .context("building video client")?;
        let reddit = RedditClient::new(
            config.reddit_client_id.clone(),
            config.reddit_client_secret.clone(),
            &config.reddit_user_agent,
            timeout,
        )
        .context("building forum client")?;
        let ticketmaster = TicketmasterClient::new(config.ticketmaster_api_key.clone(), timeout)
            .context("building events client")?;
        let trends =
            TrendsClient::new(TRENDS_HL, TRENDS_TZ, timeout).context("building trends client")?;

        Ok(Providers::builder()
            .catalog(Arc::new(spotify))
            .video(Arc::new(youtube))
            .forum(Arc::new(reddit))
            .events(Arc::new(ticketmaster))
            .trends(Arc::new(trends))
            .build())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorOptions {
    pub failure_policy: FailurePolicy,
    pub forum_thread_concurrency: usize,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Degrade,
            forum_thread_concurrency: artistpulse_common::config::DEFAULT_FORUM_THREAD_CONCURRENCY,
        }
    }
}

impl From<&Config> for AggregatorOptions {
    fn from(config: &Config) -> Self {
        Self {
            failure_policy: config.failure_policy,
            forum_thread_concurrency: config.forum_thread_concurrency,
        }
    }
}

/// One artist's session: the identity resolved at construction plus a
/// fetcher per provider. Fetches are independent and may be repeated.
pub struct ArtistProfileAggregator {
    identity: ArtistIdentity,
    catalog: CatalogMetricsFetcher,
    video: VideoChannelStatsFetcher,
    social: SocialSentimentFetcher,
    events: EventListingsFetcher,
    trends: SearchTrendFetcher,
}

impl ArtistProfileAggregator {
    /// Resolve `artist_name` and build the session. Fails with
    /// `IdentityNotFound` when the catalog knows no such artist.
    pub async fn new(artist_name: &str, providers: Providers, options: AggregatorOptions) -> Result<Self> {
        let resolver = IdentityResolver::new(
            providers.catalog.clone(),
            providers.video.clone(),
            options.failure_policy,
        );
        let identity = resolver.resolve(artist_name).await?;
        Ok(Self::with_identity(identity, providers, options))
    }

    /// Build a session around an already-resolved identity.
    pub fn with_identity(identity: ArtistIdentity, providers: Providers, options: AggregatorOptions) -> Self {
        let policy = options.failure_policy;
        Self {
            identity,
            catalog: CatalogMetricsFetcher::new(providers.catalog, policy),
            video: VideoChannelStatsFetcher::new(providers.video, policy),
            social: SocialSentimentFetcher::new(
                providers.forum,
                providers.sentiment,
                policy,
                options.forum_thread_concurrency,
            ),
            events: EventListingsFetcher::new(providers.events),
            trends: SearchTrendFetcher::new(providers.trends, policy),
        }
    }

    pub fn identity(&self) -> &ArtistIdentity {
        &self.identity
    }

    pub async fn tracks(&self) -> Result<Table<TrackRecord>> {
        self.catalog.fetch(&self.identity).await
    }

    pub async fn channel_stats(&self) -> Result<Table<ChannelStats>> {
        self.video.fetch(&self.identity).await
    }

    pub async fn comments(&self) -> Result<Table<CommentRecord>> {
        self.social.fetch(&self.identity).await
    }

    pub async fn events(&self) -> Table<EventRecord> {
        self.events.fetch(&self.identity).await
    }

    pub async fn trends(&self) -> Result<Table<TrendPoint>> {
        self.trends.fetch(&self.identity).await
    }

    /// Run every fetcher concurrently and join the results. A failing fetcher
    /// contributes an empty table and a [`FetchFailure`]; the others are
    /// unaffected.
    pub async fn snapshot(&self) -> ProfileSnapshot {
        let id = Uuid::new_v4();
        info!(snapshot_id = %id, artist = self.identity.name.as_str(), "Taking profile snapshot");

        let (tracks, channel, comments, events, trends) = tokio::join!(
            self.tracks(),
            self.channel_stats(),
            self.comments(),
            self.events(),
            self.trends(),
        );

        let mut failures = Vec::new();
        let tracks = isolate(tracks, &mut failures);
        let channel = isolate(channel, &mut failures);
        let comments = isolate(comments, &mut failures);
        let trends = isolate(trends, &mut failures);

        ProfileSnapshot {
            id,
            taken_at: Utc::now(),
            identity: self.identity.clone(),
            tracks,
            channel,
            comments,
            events,
            trends,
            failures,
        }
    }
}

fn isolate<R: Record>(result: Result<Table<R>>, failures: &mut Vec<FetchFailure>) -> Table<R> {
    match result {
        Ok(table) => table,
        Err(e) => {
            warn!(table = R::TABLE, error = %e, "Fetch failed, snapshot keeps an empty table");
            failures.push(FetchFailure {
                table: R::TABLE,
                provider: e.provider(),
                message: e.to_string(),
            });
            Table::empty()
        }
    }
}

/// A fetch that failed while building a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailure {
    pub table: &'static str,
    pub provider: Option<Provider>,
    pub message: String,
}

/// Every table for one artist, fetched together.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub id: Uuid,
    pub taken_at: DateTime<Utc>,
    pub identity: ArtistIdentity,
    pub tracks: Table<TrackRecord>,
    pub channel: Table<ChannelStats>,
    pub comments: Table<CommentRecord>,
    pub events: Table<EventRecord>,
    pub trends: Table<TrendPoint>,
    pub failures: Vec<FetchFailure>,
}
