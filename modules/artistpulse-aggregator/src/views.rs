//! Dashboard views derived from fetched tables. Pure functions; nothing here
//! talks to a provider.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use artistpulse_common::{
    ArtistIdentity, ChannelStats, CommentRecord, EventRecord, Table, TrackRecord,
};
use serde::Serialize;

pub const DEFAULT_TOP_TRACKS: usize = 5;
pub const DEFAULT_TOP_COMMENTS: usize = 10;
pub const MAX_TOP_COMMENTS: usize = 20;
pub const SENTIMENT_BINS: usize = 20;

/// Scalar tiles shown above the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickMetrics {
    pub followers: u64,
    pub subscribers: u64,
    pub upcoming_events: usize,
}

pub fn quick_metrics(
    identity: &ArtistIdentity,
    channel: &Table<ChannelStats>,
    events: &Table<EventRecord>,
) -> QuickMetrics {
    QuickMetrics {
        followers: identity.catalog_followers.unwrap_or(0),
        subscribers: channel.first().map(|s| s.subscriber_count).unwrap_or(0),
        upcoming_events: events.len(),
    }
}

/// The `n` most popular tracks, most popular first. Ties keep provider order.
pub fn top_tracks(tracks: &Table<TrackRecord>, n: usize) -> Vec<TrackRecord> {
    let mut sorted = tracks.rows().to_vec();
    sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularityShare {
    pub release_date: String,
    pub popularity: u64,
}

/// Summed popularity per release date, in date order.
pub fn popularity_by_release_date(tracks: &Table<TrackRecord>) -> Vec<PopularityShare> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for track in tracks.rows() {
        *totals.entry(track.release_date.as_str()).or_default() += u64::from(track.popularity);
    }
    totals
        .into_iter()
        .map(|(release_date, popularity)| PopularityShare {
            release_date: release_date.to_string(),
            popularity,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Box-plot summary of track durations in milliseconds.
pub fn duration_summary(tracks: &Table<TrackRecord>) -> Option<FiveNumberSummary> {
    let mut values: Vec<f64> = tracks.rows().iter().map(|t| t.duration_ms as f64).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(FiveNumberSummary {
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[values.len() - 1],
    })
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins over [-1, 1]. The top edge belongs to the last bin.
pub fn sentiment_histogram(comments: &Table<CommentRecord>, bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let width = 2.0 / bins as f64;
    let mut counts = vec![0usize; bins];

    for comment in comments.rows() {
        let idx = ((comment.sentiment + 1.0) / width).floor();
        let idx = (idx.max(0.0) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: -1.0 + i as f64 * width,
            upper: -1.0 + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// The `n` highest-scored comments, `n` clamped to 1..=20.
pub fn top_comments(comments: &Table<CommentRecord>, n: usize) -> Vec<CommentRecord> {
    let n = n.clamp(1, MAX_TOP_COMMENTS);
    let mut sorted = comments.rows().to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Events per city, busiest first, then alphabetical.
pub fn events_per_city(events: &Table<EventRecord>) -> Vec<CityCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in events.rows() {
        *counts.entry(event.city.as_str()).or_default() += 1;
    }
    let mut out: Vec<CityCount> = counts
        .into_iter()
        .map(|(city, count)| CityCount {
            city: city.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.city.cmp(&b.city)));
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricBar {
    pub metric: &'static str,
    pub count: u64,
}

pub fn channel_metric_bars(channel: &Table<ChannelStats>) -> Vec<MetricBar> {
    let Some(stats) = channel.first() else {
        return Vec::new();
    };
    vec![
        MetricBar {
            metric: "Views",
            count: stats.view_count,
        },
        MetricBar {
            metric: "Subscribers",
            count: stats.subscriber_count,
        },
        MetricBar {
            metric: "Videos",
            count: stats.video_count,
        },
    ]
}
