//! End-to-end sessions: resolve an artist, then take a snapshot of every
//! table. Covers the four dashboard walkthroughs and failure isolation.

use artistpulse_aggregator::testing::*;
use artistpulse_aggregator::views;
use artistpulse_aggregator::{AggregatorOptions, ArtistProfileAggregator, Provider};
use artistpulse_common::{FailurePolicy, Record, TrackRecord, TrendPoint};
use chrono::NaiveDate;

fn full_suga() -> MockProviders {
    let tracks = (0..10)
        .map(|i| track(&format!("Track {i}"), 60 + i, 200_000, "2023-04-21"))
        .collect();
    let week = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();

    MockProviders::new(
        MockCatalog::new()
            .on_search("SUGA", vec![artist("sp-suga", "SUGA", 9_800_000)])
            .on_tracks("sp-suga", tracks),
        MockVideo::new()
            .on_search("SUGA", "UC-suga")
            .on_statistics("UC-suga", counters("500", Some("40"), "12")),
        MockForum::new()
            .on_search("SUGA", vec![thread("t1", "thread")])
            .on_thread(
                "t1",
                vec![
                    forum_comment("one", 3, vec![]),
                    forum_comment("two", 2, vec![more(9)]),
                    forum_comment("three", 1, vec![]),
                ],
            ),
        MockEvents::new().on_search(
            "SUGA",
            vec![event(Some("Tour"), Some("2024-08-06"), Some(("UBS Arena", "Elmont")))],
        ),
        MockTrends::new().on_keyword("SUGA", vec![interest(week(2), 70, false), interest(week(9), 80, true)]),
    )
}

async fn session(mocks: &MockProviders, policy: FailurePolicy) -> ArtistProfileAggregator {
    let options = AggregatorOptions {
        failure_policy: policy,
        ..AggregatorOptions::default()
    };
    ArtistProfileAggregator::new("SUGA", mocks.providers(), options)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Walkthroughs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolved_artist_gets_every_top_track() {
    let mocks = full_suga();
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    assert!(agg.identity().catalog_id.is_some());
    let tracks = agg.tracks().await.unwrap();
    assert_eq!(tracks.len(), 10);
    assert!(tracks.rows().iter().all(|t| t.popularity <= 100));
}

#[tokio::test]
async fn artist_without_channel_gets_empty_channel_table() {
    let mocks = MockProviders::new(
        MockCatalog::new().on_search("SUGA", vec![artist("sp-suga", "SUGA", 1)]),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    let channel = agg.channel_stats().await.unwrap();
    assert!(channel.is_empty());
}

#[tokio::test]
async fn events_timeout_yields_empty_table() {
    let mocks = MockProviders::new(
        MockCatalog::new().on_search("SUGA", vec![artist("sp-suga", "SUGA", 1)]),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new().failing(),
        MockTrends::new(),
    );
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    assert!(agg.events().await.is_empty());
}

#[tokio::test]
async fn thread_with_placeholder_yields_three_scored_comments() {
    let mocks = full_suga().with_scorer(FixedScorer::new().on_text("one", 0.5).on_text("three", -0.25));
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    let comments = agg.comments().await.unwrap();
    assert_eq!(comments.len(), 3);
    let sentiments: Vec<f64> = comments.rows().iter().map(|c| c.sentiment).collect();
    assert_eq!(sentiments, vec![0.5, 0.0, -0.25]);
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snapshot_collects_every_table() {
    let mocks = full_suga();
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    let snap = agg.snapshot().await;

    assert!(snap.failures.is_empty());
    assert_eq!(snap.identity.name, "SUGA");
    assert_eq!(snap.tracks.len(), 10);
    assert_eq!(snap.channel.len(), 1);
    assert_eq!(snap.comments.len(), 3);
    assert_eq!(snap.events.len(), 1);
    assert_eq!(snap.trends.len(), 2);

    let metrics = views::quick_metrics(&snap.identity, &snap.channel, &snap.events);
    assert_eq!(metrics.followers, 9_800_000);
    assert_eq!(metrics.subscribers, 40);
    assert_eq!(metrics.upcoming_events, 1);
}

#[tokio::test]
async fn snapshot_isolates_a_failing_provider() {
    let mocks = MockProviders::new(
        MockCatalog::new().on_search("SUGA", vec![artist("sp-suga", "SUGA", 9_800_000)]),
        MockVideo::new()
            .on_search("SUGA", "UC-suga")
            .on_statistics("UC-suga", counters("500", Some("40"), "12")),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new().failing(),
    );
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    let snap = agg.snapshot().await;

    // No tracks registered for sp-suga, and trends always fails.
    let failed: Vec<&str> = snap.failures.iter().map(|f| f.table).collect();
    assert_eq!(failed, vec![TrackRecord::TABLE, TrendPoint::TABLE]);
    assert_eq!(snap.failures[1].provider, Some(Provider::Trends));
    assert!(snap.tracks.is_empty());
    assert!(snap.trends.is_empty());
    assert_eq!(snap.channel.len(), 1);
}

#[tokio::test]
async fn degraded_snapshot_reports_no_failures() {
    let mocks = MockProviders::new(
        MockCatalog::new().on_search("SUGA", vec![artist("sp-suga", "SUGA", 1)]),
        MockVideo::new(),
        MockForum::new().failing_search(),
        MockEvents::new().failing(),
        MockTrends::new().failing(),
    );
    let agg = session(&mocks, FailurePolicy::Degrade).await;

    let snap = agg.snapshot().await;

    assert!(snap.failures.is_empty());
    assert!(snap.comments.is_empty());
    assert!(snap.trends.is_empty());
}

#[tokio::test]
async fn snapshot_serializes_tables_with_columns() {
    let mocks = full_suga();
    let agg = session(&mocks, FailurePolicy::Degrade).await;

    let json = serde_json::to_value(agg.snapshot().await).unwrap();

    assert_eq!(json["tracks"]["table"], "tracks");
    assert_eq!(json["channel"]["columns"], serde_json::json!(["view_count", "subscriber_count", "video_count"]));
    assert_eq!(json["trends"]["rows"][1]["is_partial"], true);
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn repeated_fetches_return_fresh_equal_tables() {
    let mocks = full_suga();
    let agg = session(&mocks, FailurePolicy::Propagate).await;

    let first = agg.tracks().await.unwrap();
    let second = agg.tracks().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(mocks.catalog.track_calls(), 2);
}
