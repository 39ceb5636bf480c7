use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Sentinel for optional upstream fields that were absent.
pub const UNKNOWN: &str = "Unknown";

// --- Identity ---

/// Provider identities for one artist name. Built once per session and never
/// mutated; fetchers that need a missing id return an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArtistIdentity {
    /// The query exactly as given.
    pub name: String,
    pub catalog_id: Option<String>,
    /// Follower count reported by the catalog search hit.
    pub catalog_followers: Option<u64>,
    pub video_channel_id: Option<String>,
}

impl ArtistIdentity {
    /// An identity with nothing resolved.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog_id: None,
            catalog_followers: None,
            video_channel_id: None,
        }
    }

    pub fn with_catalog(mut self, id: impl Into<String>, followers: Option<u64>) -> Self {
        self.catalog_id = Some(id.into());
        self.catalog_followers = followers;
        self
    }

    pub fn with_video_channel(mut self, id: impl Into<String>) -> Self {
        self.video_channel_id = Some(id.into());
        self
    }
}

// --- Tabular model ---

/// A row type with a fixed, documented column set. Column names match the
/// serialized field names.
pub trait Record: Serialize {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
}

/// A uniformly-shaped, possibly empty, sequence of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: Record> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn name(&self) -> &'static str {
        R::TABLE
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&R> {
        self.rows.first()
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Record> From<Vec<R>> for Table<R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}

impl<R: Record> Serialize for Table<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Table", 3)?;
        s.serialize_field("table", R::TABLE)?;
        s.serialize_field("columns", R::COLUMNS)?;
        s.serialize_field("rows", &self.rows)?;
        s.end()
    }
}

// --- Records ---

/// One top track from the catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrackRecord {
    pub name: String,
    /// 0–100.
    pub popularity: u32,
    pub duration_ms: u64,
    /// Provider-native granularity: "2016", "2016-08" or "2016-08-15".
    pub release_date: String,
}

impl Record for TrackRecord {
    const TABLE: &'static str = "tracks";
    const COLUMNS: &'static [&'static str] = &["name", "popularity", "duration_ms", "release_date"];
}

/// Aggregate counters for a video channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChannelStats {
    pub view_count: u64,
    pub subscriber_count: u64,
    pub video_count: u64,
}

impl Record for ChannelStats {
    const TABLE: &'static str = "channel_stats";
    const COLUMNS: &'static [&'static str] = &["view_count", "subscriber_count", "video_count"];
}

/// A forum comment with its sentiment polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommentRecord {
    pub body: String,
    pub score: i64,
    pub created: DateTime<Utc>,
    /// Polarity in [-1.0, 1.0].
    pub sentiment: f64,
}

impl Record for CommentRecord {
    const TABLE: &'static str = "comments";
    const COLUMNS: &'static [&'static str] = &["body", "score", "created", "sentiment"];
}

/// An upcoming live event. Absent upstream fields hold [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventRecord {
    pub name: String,
    pub date: String,
    pub venue: String,
    pub city: String,
}

impl Record for EventRecord {
    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &["name", "date", "venue", "city"];
}

/// One bucket of relative search interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub interest: i64,
    pub is_partial: bool,
}

impl Record for TrendPoint {
    const TABLE: &'static str = "trends";
    const COLUMNS: &'static [&'static str] = &["date", "interest", "is_partial"];
}
