// Provider seams for the aggregator.
//
// Each trait covers one upstream service and speaks in provider-agnostic
// shapes, so fetchers never see client crate types. The real clients are
// adapted below; `testing` supplies in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use reddit_client::{CommentNode, RedditClient};
use spotify_client::SpotifyClient;
use ticketmaster_client::TicketmasterClient;
use trends_client::TrendsClient;
use youtube_client::YouTubeClient;

// ---------------------------------------------------------------------------
// Upstream shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
    pub followers: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTrack {
    pub name: String,
    pub popularity: u32,
    pub duration_ms: u64,
    pub release_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoChannel {
    pub channel_id: String,
    pub title: Option<String>,
}

/// Channel counters exactly as the provider sends them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChannelStatistics {
    pub view_count: Option<String>,
    pub subscriber_count: Option<String>,
    pub video_count: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForumThread {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForumComment {
    pub body: String,
    pub score: i64,
    pub created: DateTime<Utc>,
}

/// One node of a thread's comment forest.
#[derive(Debug, Clone, PartialEq)]
pub enum ForumNode {
    Comment {
        comment: ForumComment,
        replies: Vec<ForumNode>,
    },
    /// A truncated "load more" marker standing in for `count` hidden comments.
    More { count: u64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEvent {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub venues: Vec<RawVenue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVenue {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawInterestPoint {
    pub time: DateTime<Utc>,
    pub value: i64,
    pub is_partial: bool,
}

// ---------------------------------------------------------------------------
// Provider traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Artists matching a free-text name, most relevant first.
    async fn search_artists(&self, name: &str) -> Result<Vec<CatalogArtist>>;

    /// The provider's top tracks for an artist, in provider order.
    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<CatalogTrack>>;
}

#[async_trait]
pub trait VideoProvider: Send + Sync {
    async fn search_channels(&self, name: &str, max_results: u32) -> Result<Vec<VideoChannel>>;

    /// `None` when the channel id matches nothing.
    async fn channel_statistics(&self, channel_id: &str) -> Result<Option<RawChannelStatistics>>;
}

#[async_trait]
pub trait ForumProvider: Send + Sync {
    /// Global keyword search across all communities.
    async fn search_threads(&self, query: &str, limit: u32) -> Result<Vec<ForumThread>>;

    /// The first-page comment forest of a thread, placeholders unexpanded.
    async fn thread_comments(&self, thread_id: &str) -> Result<Vec<ForumNode>>;
}

#[async_trait]
pub trait EventsProvider: Send + Sync {
    async fn find_events(&self, keyword: &str, size: u32) -> Result<Vec<RawEvent>>;
}

#[async_trait]
pub trait TrendsProvider: Send + Sync {
    async fn interest_over_time(&self, keyword: &str, timeframe: &str) -> Result<Vec<RawInterestPoint>>;
}

// ---------------------------------------------------------------------------
// Real clients
// ---------------------------------------------------------------------------

#[async_trait]
impl CatalogProvider for SpotifyClient {
    async fn search_artists(&self, name: &str) -> Result<Vec<CatalogArtist>> {
        let artists = SpotifyClient::search_artists(self, name).await?;
        Ok(artists
            .into_iter()
            .map(|a| CatalogArtist {
                followers: a.follower_count(),
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<CatalogTrack>> {
        let tracks = self.artist_top_tracks(artist_id).await?;
        Ok(tracks
            .into_iter()
            .map(|t| CatalogTrack {
                name: t.name,
                popularity: t.popularity,
                duration_ms: t.duration_ms,
                release_date: t.album.release_date,
            })
            .collect())
    }
}

#[async_trait]
impl VideoProvider for YouTubeClient {
    async fn search_channels(&self, name: &str, max_results: u32) -> Result<Vec<VideoChannel>> {
        let hits = YouTubeClient::search_channels(self, name, max_results).await?;
        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                let channel_id = hit.channel_id()?.to_string();
                Some(VideoChannel {
                    channel_id,
                    title: hit.snippet.and_then(|s| s.title),
                })
            })
            .collect())
    }

    async fn channel_statistics(&self, channel_id: &str) -> Result<Option<RawChannelStatistics>> {
        let stats = YouTubeClient::channel_statistics(self, channel_id).await?;
        Ok(stats.map(|s| RawChannelStatistics {
            view_count: s.view_count,
            subscriber_count: s.subscriber_count,
            video_count: s.video_count,
        }))
    }
}

#[async_trait]
impl ForumProvider for RedditClient {
    async fn search_threads(&self, query: &str, limit: u32) -> Result<Vec<ForumThread>> {
        let submissions = self.search("all", query, limit).await?;
        Ok(submissions
            .into_iter()
            .map(|s| ForumThread {
                id: s.id,
                title: s.title,
            })
            .collect())
    }

    async fn thread_comments(&self, thread_id: &str) -> Result<Vec<ForumNode>> {
        let tree = self.comment_tree(thread_id).await?;
        Ok(tree.roots.into_iter().map(forum_node).collect())
    }
}

fn forum_node(node: CommentNode) -> ForumNode {
    match node {
        CommentNode::More(more) => ForumNode::More { count: more.count },
        CommentNode::Comment(comment) => {
            let comment = *comment;
            let created = comment.created_at().unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            let replies = comment
                .replies
                .map(|listing| listing.data.children.into_iter().map(forum_node).collect())
                .unwrap_or_default();
            ForumNode::Comment {
                comment: ForumComment {
                    body: comment.body,
                    score: comment.score,
                    created,
                },
                replies,
            }
        }
    }
}

#[async_trait]
impl EventsProvider for TicketmasterClient {
    async fn find_events(&self, keyword: &str, size: u32) -> Result<Vec<RawEvent>> {
        let events = TicketmasterClient::find_events(self, keyword, size).await?;
        Ok(events
            .into_iter()
            .map(|e| RawEvent {
                start_date: e.start_date().map(str::to_string),
                venues: e
                    .venues()
                    .iter()
                    .map(|v| RawVenue {
                        name: v.name.clone(),
                        city: v.city.as_ref().and_then(|c| c.name.clone()),
                    })
                    .collect(),
                name: e.name,
            })
            .collect())
    }
}

#[async_trait]
impl TrendsProvider for TrendsClient {
    async fn interest_over_time(&self, keyword: &str, timeframe: &str) -> Result<Vec<RawInterestPoint>> {
        let points = TrendsClient::interest_over_time(self, keyword, timeframe).await?;
        Ok(points
            .into_iter()
            .map(|p| RawInterestPoint {
                time: p.time,
                value: p.value,
                is_partial: p.is_partial,
            })
            .collect())
    }
}
