// Test mocks for the aggregator.
//
// One mock per provider trait, plus a deterministic sentiment scorer:
// - MockCatalog (CatalogProvider): name → artists, artist id → tracks
// - MockVideo (VideoProvider): name → channels, channel id → counters
// - MockForum (ForumProvider): query → threads, thread id → comment forest
// - MockEvents (EventsProvider): keyword → events
// - MockTrends (TrendsProvider): keyword → interest points
// - FixedScorer (SentimentScorer): text → score, 0.0 otherwise
//
// Every mock counts its calls so tests can assert a provider was never hit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::aggregator::Providers;
use crate::sentiment::SentimentScorer;
use crate::traits::{
    CatalogArtist, CatalogProvider, CatalogTrack, EventsProvider, ForumComment, ForumNode,
    ForumProvider, ForumThread, RawChannelStatistics, RawEvent, RawInterestPoint, RawVenue,
    TrendsProvider, VideoChannel, VideoProvider,
};

// ---------------------------------------------------------------------------
// MockCatalog
// ---------------------------------------------------------------------------

/// Unregistered names search to zero hits. Unregistered artist ids error.
#[derive(Default)]
pub struct MockCatalog {
    artists: HashMap<String, Vec<CatalogArtist>>,
    tracks: HashMap<String, Vec<CatalogTrack>>,
    failing: bool,
    search_calls: AtomicUsize,
    track_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, name: &str, artists: Vec<CatalogArtist>) -> Self {
        self.artists.insert(name.to_string(), artists);
        self
    }

    pub fn on_tracks(mut self, artist_id: &str, tracks: Vec<CatalogTrack>) -> Self {
        self.tracks.insert(artist_id.to_string(), tracks);
        self
    }

    /// Every call fails.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn track_calls(&self) -> usize {
        self.track_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogProvider for MockCatalog {
    async fn search_artists(&self, name: &str) -> Result<Vec<CatalogArtist>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            bail!("MockCatalog: search unavailable");
        }
        Ok(self.artists.get(name).cloned().unwrap_or_default())
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<CatalogTrack>> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            bail!("MockCatalog: top tracks unavailable");
        }
        self.tracks
            .get(artist_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockCatalog: no tracks registered for {artist_id}"))
    }
}

// ---------------------------------------------------------------------------
// MockVideo
// ---------------------------------------------------------------------------

/// Unregistered names find no channel; unregistered channel ids have no
/// statistics.
#[derive(Default)]
pub struct MockVideo {
    channels: HashMap<String, Vec<VideoChannel>>,
    statistics: HashMap<String, RawChannelStatistics>,
    failing_search: bool,
    failing_statistics: bool,
    search_calls: AtomicUsize,
    statistics_calls: AtomicUsize,
}

impl MockVideo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, name: &str, channel_id: &str) -> Self {
        self.channels.insert(
            name.to_string(),
            vec![VideoChannel {
                channel_id: channel_id.to_string(),
                title: Some(name.to_string()),
            }],
        );
        self
    }

    pub fn on_statistics(mut self, channel_id: &str, stats: RawChannelStatistics) -> Self {
        self.statistics.insert(channel_id.to_string(), stats);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.failing_search = true;
        self
    }

    pub fn failing_statistics(mut self) -> Self {
        self.failing_statistics = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn statistics_calls(&self) -> usize {
        self.statistics_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoProvider for MockVideo {
    async fn search_channels(&self, name: &str, max_results: u32) -> Result<Vec<VideoChannel>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_search {
            bail!("MockVideo: quota exceeded");
        }
        let mut hits = self.channels.get(name).cloned().unwrap_or_default();
        hits.truncate(max_results as usize);
        Ok(hits)
    }

    async fn channel_statistics(&self, channel_id: &str) -> Result<Option<RawChannelStatistics>> {
        self.statistics_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_statistics {
            bail!("MockVideo: statistics unavailable");
        }
        Ok(self.statistics.get(channel_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// MockForum
// ---------------------------------------------------------------------------

/// Unregistered queries find no threads. Unregistered thread ids error, which
/// is how tests simulate a single thread failing to load.
#[derive(Default)]
pub struct MockForum {
    threads: HashMap<String, Vec<ForumThread>>,
    comments: HashMap<String, Vec<ForumNode>>,
    failing_search: bool,
    search_calls: AtomicUsize,
    comment_calls: AtomicUsize,
    last_limit: Mutex<Option<u32>>,
}

impl MockForum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, query: &str, threads: Vec<ForumThread>) -> Self {
        self.threads.insert(query.to_string(), threads);
        self
    }

    pub fn on_thread(mut self, thread_id: &str, forest: Vec<ForumNode>) -> Self {
        self.comments.insert(thread_id.to_string(), forest);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.failing_search = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn comment_calls(&self) -> usize {
        self.comment_calls.load(Ordering::SeqCst)
    }

    pub fn last_limit(&self) -> Option<u32> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl ForumProvider for MockForum {
    async fn search_threads(&self, query: &str, limit: u32) -> Result<Vec<ForumThread>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_limit.lock().unwrap() = Some(limit);
        if self.failing_search {
            bail!("MockForum: search unavailable");
        }
        Ok(self.threads.get(query).cloned().unwrap_or_default())
    }

    async fn thread_comments(&self, thread_id: &str) -> Result<Vec<ForumNode>> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        self.comments
            .get(thread_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockForum: no comments registered for {thread_id}"))
    }
}

// ---------------------------------------------------------------------------
// MockEvents
// ---------------------------------------------------------------------------

/// Unregistered keywords have no events. Honors the requested page size.
#[derive(Default)]
pub struct MockEvents {
    events: HashMap<String, Vec<RawEvent>>,
    failing: bool,
    calls: AtomicUsize,
    last_size: Mutex<Option<u32>>,
}

impl MockEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, keyword: &str, events: Vec<RawEvent>) -> Self {
        self.events.insert(keyword.to_string(), events);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_size(&self) -> Option<u32> {
        *self.last_size.lock().unwrap()
    }
}

#[async_trait]
impl EventsProvider for MockEvents {
    async fn find_events(&self, keyword: &str, size: u32) -> Result<Vec<RawEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_size.lock().unwrap() = Some(size);
        if self.failing {
            bail!("MockEvents: connection reset");
        }
        let mut events = self.events.get(keyword).cloned().unwrap_or_default();
        events.truncate(size as usize);
        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// MockTrends
// ---------------------------------------------------------------------------

/// Unregistered keywords have an empty series.
#[derive(Default)]
pub struct MockTrends {
    series: HashMap<String, Vec<RawInterestPoint>>,
    failing: bool,
    last_timeframe: Mutex<Option<String>>,
}

impl MockTrends {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_keyword(mut self, keyword: &str, points: Vec<RawInterestPoint>) -> Self {
        self.series.insert(keyword.to_string(), points);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn last_timeframe(&self) -> Option<String> {
        self.last_timeframe.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrendsProvider for MockTrends {
    async fn interest_over_time(&self, keyword: &str, timeframe: &str) -> Result<Vec<RawInterestPoint>> {
        *self.last_timeframe.lock().unwrap() = Some(timeframe.to_string());
        if self.failing {
            bail!("MockTrends: rate limited");
        }
        Ok(self.series.get(keyword).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// FixedScorer
// ---------------------------------------------------------------------------

/// Scores registered texts with a fixed value, everything else 0.0.
#[derive(Default)]
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_text(mut self, text: &str, score: f64) -> Self {
        self.scores.insert(text.to_string(), score);
        self
    }
}

impl SentimentScorer for FixedScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.scores.get(text).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Handles to every mock, kept so tests can inspect call counts after the
/// aggregator has taken its own `Arc`s.
pub struct MockProviders {
    pub catalog: Arc<MockCatalog>,
    pub video: Arc<MockVideo>,
    pub forum: Arc<MockForum>,
    pub events: Arc<MockEvents>,
    pub trends: Arc<MockTrends>,
    pub scorer: Arc<FixedScorer>,
}

impl MockProviders {
    pub fn new(
        catalog: MockCatalog,
        video: MockVideo,
        forum: MockForum,
        events: MockEvents,
        trends: MockTrends,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            video: Arc::new(video),
            forum: Arc::new(forum),
            events: Arc::new(events),
            trends: Arc::new(trends),
            scorer: Arc::new(FixedScorer::new()),
        }
    }

    pub fn with_scorer(mut self, scorer: FixedScorer) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn providers(&self) -> Providers {
        Providers::builder()
            .catalog(self.catalog.clone())
            .video(self.video.clone())
            .forum(self.forum.clone())
            .events(self.events.clone())
            .trends(self.trends.clone())
            .sentiment(self.scorer.clone())
            .build()
    }
}

pub fn artist(id: &str, name: &str, followers: u64) -> CatalogArtist {
    CatalogArtist {
        id: id.to_string(),
        name: name.to_string(),
        followers: Some(followers),
    }
}

pub fn track(name: &str, popularity: u32, duration_ms: u64, release_date: &str) -> CatalogTrack {
    CatalogTrack {
        name: name.to_string(),
        popularity,
        duration_ms,
        release_date: release_date.to_string(),
    }
}

pub fn counters(views: &str, subscribers: Option<&str>, videos: &str) -> RawChannelStatistics {
    RawChannelStatistics {
        view_count: Some(views.to_string()),
        subscriber_count: subscribers.map(str::to_string),
        video_count: Some(videos.to_string()),
    }
}

pub fn thread(id: &str, title: &str) -> ForumThread {
    ForumThread {
        id: id.to_string(),
        title: title.to_string(),
    }
}

/// Fixed creation time shared by test comments.
pub fn test_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn forum_comment(body: &str, score: i64, replies: Vec<ForumNode>) -> ForumNode {
    ForumNode::Comment {
        comment: ForumComment {
            body: body.to_string(),
            score,
            created: test_time(),
        },
        replies,
    }
}

pub fn more(count: u64) -> ForumNode {
    ForumNode::More { count }
}

pub fn event(name: Option<&str>, date: Option<&str>, venue: Option<(&str, &str)>) -> RawEvent {
    RawEvent {
        name: name.map(str::to_string),
        start_date: date.map(str::to_string),
        venues: venue
            .map(|(name, city)| {
                vec![RawVenue {
                    name: Some(name.to_string()),
                    city: Some(city.to_string()),
                }]
            })
            .unwrap_or_default(),
    }
}

/// A weekly point at midnight UTC on `date`.
pub fn interest(date: NaiveDate, value: i64, is_partial: bool) -> RawInterestPoint {
    RawInterestPoint {
        time: date.and_hms_opt(0, 0, 0).unwrap().and_utc(),
        value,
        is_partial,
    }
}
