//! Upstream shape → record projection.
//!
//! Every optional upstream field that ends up in a record is mapped here, in
//! one place, so the sentinel rules stay consistent across fetchers.

use std::collections::VecDeque;

use artistpulse_common::{
    ChannelStats, CommentRecord, EventRecord, TrackRecord, TrendPoint, UNKNOWN,
};

use crate::error::{AggregatorError, Provider, Result};
use crate::sentiment::{clamp_polarity, SentimentScorer};
use crate::traits::{
    CatalogTrack, ForumComment, ForumNode, RawChannelStatistics, RawEvent, RawInterestPoint,
};

const MAX_POPULARITY: u32 = 100;

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn track_record(track: CatalogTrack) -> TrackRecord {
    TrackRecord {
        name: track.name,
        popularity: track.popularity.min(MAX_POPULARITY),
        duration_ms: track.duration_ms,
        release_date: track.release_date,
    }
}

/// Parse a stringified counter. An absent counter (e.g. hidden subscriber
/// count) is zero; a present but non-numeric one is a malformed response.
pub fn parse_counter(field: &str, raw: Option<&str>) -> Result<u64> {
    match raw {
        None => Ok(0),
        Some(s) => s.trim().parse::<u64>().map_err(|_| {
            AggregatorError::malformed(Provider::Video, format!("{field} is not a counter: {s:?}"))
        }),
    }
}

pub fn channel_stats(raw: &RawChannelStatistics) -> Result<ChannelStats> {
    Ok(ChannelStats {
        view_count: parse_counter("viewCount", raw.view_count.as_deref())?,
        subscriber_count: parse_counter("subscriberCount", raw.subscriber_count.as_deref())?,
        video_count: parse_counter("videoCount", raw.video_count.as_deref())?,
    })
}

/// Only the first venue is considered, even when an event lists several.
pub fn event_record(event: RawEvent) -> EventRecord {
    let (venue, city) = match event.venues.into_iter().next() {
        Some(v) => (v.name, v.city),
        None => (None, None),
    };
    EventRecord {
        name: or_unknown(event.name),
        date: or_unknown(event.start_date),
        venue: or_unknown(venue),
        city: or_unknown(city),
    }
}

pub fn trend_point(point: RawInterestPoint) -> TrendPoint {
    TrendPoint {
        date: point.time.date_naive(),
        interest: point.value,
        is_partial: point.is_partial,
    }
}

/// Flatten a comment forest breadth-first. "Load more" placeholders are
/// dropped without expansion; the second value counts how many were dropped.
pub fn flatten_zero_depth(roots: Vec<ForumNode>) -> (Vec<ForumComment>, usize) {
    let mut comments = Vec::new();
    let mut discarded = 0;
    let mut queue: VecDeque<ForumNode> = roots.into();

    while let Some(node) = queue.pop_front() {
        match node {
            ForumNode::More { .. } => discarded += 1,
            ForumNode::Comment { comment, replies } => {
                comments.push(comment);
                queue.extend(replies);
            }
        }
    }

    (comments, discarded)
}

pub fn comment_record(comment: ForumComment, scorer: &dyn SentimentScorer) -> CommentRecord {
    let sentiment = clamp_polarity(scorer.polarity(&comment.body));
    CommentRecord {
        body: comment.body,
        score: comment.score,
        created: comment.created,
        sentiment,
    }
}
