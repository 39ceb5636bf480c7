//! Per-fetcher behavior: empty-safety, count bounds, counter coercion,
//! sentinel substitution, events fault tolerance and the failure policy.
//!
//! Fetchers are driven through `ArtistProfileAggregator::with_identity` so
//! each test controls exactly which ids are resolved.

use artistpulse_aggregator::fetchers::{EVENT_PAGE_SIZE, THREAD_SEARCH_LIMIT};
use artistpulse_aggregator::testing::*;
use artistpulse_aggregator::{AggregatorError, AggregatorOptions, ArtistProfileAggregator, Provider};
use artistpulse_common::{
    ArtistIdentity, ChannelStats, CommentRecord, EventRecord, FailurePolicy, Record, TrackRecord,
    TrendPoint, UNKNOWN,
};
use chrono::NaiveDate;

fn suga() -> ArtistIdentity {
    ArtistIdentity::unresolved("SUGA")
        .with_catalog("sp-suga", Some(9_800_000))
        .with_video_channel("UC-suga")
}

fn options(policy: FailurePolicy) -> AggregatorOptions {
    AggregatorOptions {
        failure_policy: policy,
        forum_thread_concurrency: 2,
    }
}

fn aggregator(mocks: &MockProviders, identity: ArtistIdentity, policy: FailurePolicy) -> ArtistProfileAggregator {
    ArtistProfileAggregator::with_identity(identity, mocks.providers(), options(policy))
}

fn ten_tracks() -> Vec<artistpulse_aggregator::traits::CatalogTrack> {
    (0..10)
        .map(|i| track(&format!("Track {i}"), 50 + i, 180_000 + u64::from(i) * 1_000, "2023-04-21"))
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tracks_keep_provider_count_and_bounded_popularity() {
    let mocks = MockProviders::new(
        MockCatalog::new().on_tracks("sp-suga", ten_tracks()),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let tracks = aggregator(&mocks, suga(), FailurePolicy::Degrade).tracks().await.unwrap();

    assert_eq!(tracks.len(), 10);
    assert!(tracks.rows().iter().all(|t| t.popularity <= 100));
    assert_eq!(tracks.rows()[0].name, "Track 0", "provider order is kept");
}

#[tokio::test]
async fn catalog_failure_propagates_as_provider_call() {
    let mocks = MockProviders::new(
        MockCatalog::new().failing(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let err = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .tracks()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregatorError::ProviderCall { provider: Provider::Catalog, .. }
    ));
}

#[tokio::test]
async fn catalog_failure_degrades_to_empty_table() {
    let mocks = MockProviders::new(
        MockCatalog::new().failing(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let tracks = aggregator(&mocks, suga(), FailurePolicy::Degrade).tracks().await.unwrap();

    assert!(tracks.is_empty());
    assert_eq!(tracks.columns(), TrackRecord::COLUMNS);
}

#[tokio::test]
async fn missing_catalog_id_skips_the_call() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let tracks = aggregator(&mocks, ArtistIdentity::unresolved("SUGA"), FailurePolicy::Propagate)
        .tracks()
        .await
        .unwrap();

    assert!(tracks.is_empty());
    assert_eq!(mocks.catalog.track_calls(), 0);
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[tokio::test]
async fn channel_counters_are_coerced_to_integers() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new().on_statistics("UC-suga", counters("1234567890", Some("21400000"), "312")),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let channel = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .channel_stats()
        .await
        .unwrap();

    assert_eq!(channel.len(), 1);
    assert_eq!(
        channel.first(),
        Some(&ChannelStats {
            view_count: 1_234_567_890,
            subscriber_count: 21_400_000,
            video_count: 312,
        })
    );
}

#[tokio::test]
async fn hidden_subscriber_count_is_zero() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new().on_statistics("UC-suga", counters("10", None, "2")),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let channel = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .channel_stats()
        .await
        .unwrap();

    assert_eq!(channel.first().map(|s| s.subscriber_count), Some(0));
}

#[tokio::test]
async fn non_numeric_counter_is_malformed_under_propagate() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new().on_statistics("UC-suga", counters("many", Some("1"), "1")),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let err = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .channel_stats()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregatorError::MalformedUpstreamShape { provider: Provider::Video, .. }
    ));
}

#[tokio::test]
async fn no_channel_means_empty_table_and_no_call() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );
    let identity = ArtistIdentity::unresolved("SUGA").with_catalog("sp-suga", None);

    let channel = aggregator(&mocks, identity, FailurePolicy::Propagate)
        .channel_stats()
        .await
        .unwrap();

    assert!(channel.is_empty());
    assert_eq!(channel.columns(), ChannelStats::COLUMNS);
    assert_eq!(mocks.video.statistics_calls(), 0);
}

#[tokio::test]
async fn unknown_channel_id_is_an_empty_table() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let channel = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .channel_stats()
        .await
        .unwrap();

    assert!(channel.is_empty());
    assert_eq!(mocks.video.statistics_calls(), 1);
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn events_fill_unknown_for_missing_fields() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new().on_search(
            "SUGA",
            vec![
                event(Some("D-DAY Tour"), Some("2024-08-06"), Some(("UBS Arena", "Elmont"))),
                event(Some("Fan Meeting"), None, None),
                event(None, Some("2024-09-01"), Some(("KSPO Dome", "Seoul"))),
            ],
        ),
        MockTrends::new(),
    );

    let events = aggregator(&mocks, suga(), FailurePolicy::Propagate).events().await;

    assert_eq!(events.len(), 3);
    assert_eq!(
        events.rows()[0],
        EventRecord {
            name: "D-DAY Tour".into(),
            date: "2024-08-06".into(),
            venue: "UBS Arena".into(),
            city: "Elmont".into(),
        }
    );
    assert_eq!(events.rows()[1].date, UNKNOWN);
    assert_eq!(events.rows()[1].venue, UNKNOWN);
    assert_eq!(events.rows()[1].city, UNKNOWN);
    assert_eq!(events.rows()[2].name, UNKNOWN);
}

#[tokio::test]
async fn events_are_capped_at_page_size() {
    let many = (0..25)
        .map(|i| event(Some(&format!("Show {i}")), Some("2024-10-01"), Some(("Hall", "Seoul"))))
        .collect();
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new().on_search("SUGA", many),
        MockTrends::new(),
    );

    let events = aggregator(&mocks, suga(), FailurePolicy::Degrade).events().await;

    assert_eq!(events.len(), EVENT_PAGE_SIZE as usize);
    assert_eq!(mocks.events.last_size(), Some(EVENT_PAGE_SIZE));
}

#[tokio::test]
async fn events_failure_is_empty_even_under_propagate() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new().failing(),
        MockTrends::new(),
    );

    let events = aggregator(&mocks, suga(), FailurePolicy::Propagate).events().await;

    assert!(events.is_empty());
    assert_eq!(events.columns(), EventRecord::COLUMNS);
    assert_eq!(mocks.events.calls(), 1);
}

// ---------------------------------------------------------------------------
// Forum comments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn placeholders_are_discarded_and_every_comment_is_scored() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new()
            .on_search("SUGA", vec![thread("t1", "SUGA new album thread")])
            .on_thread(
                "t1",
                vec![
                    forum_comment("this album is a masterpiece", 120, vec![]),
                    forum_comment("the mixing is awful", 40, vec![]),
                    forum_comment("can't wait for the tour", 15, vec![]),
                    more(37),
                ],
            ),
        MockEvents::new(),
        MockTrends::new(),
    )
    .with_scorer(
        FixedScorer::new()
            .on_text("this album is a masterpiece", 0.8)
            .on_text("the mixing is awful", -0.6),
    );

    let comments = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .comments()
        .await
        .unwrap();

    assert_eq!(comments.len(), 3);
    let sentiments: Vec<f64> = comments.rows().iter().map(|c| c.sentiment).collect();
    assert_eq!(sentiments, vec![0.8, -0.6, 0.0]);
    assert_eq!(comments.rows()[0].score, 120);
    assert_eq!(comments.rows()[0].created, test_time());
}

#[tokio::test]
async fn nested_replies_are_flattened_into_the_table() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new()
            .on_search("SUGA", vec![thread("t1", "Agust D")])
            .on_thread(
                "t1",
                vec![forum_comment(
                    "parent",
                    5,
                    vec![forum_comment("child", 2, vec![more(3)])],
                )],
            ),
        MockEvents::new(),
        MockTrends::new(),
    );

    let comments = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .comments()
        .await
        .unwrap();

    let bodies: Vec<&str> = comments.rows().iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["parent", "child"]);
}

#[tokio::test]
async fn out_of_range_scores_are_clamped() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new()
            .on_search("SUGA", vec![thread("t1", "hype")])
            .on_thread(
                "t1",
                vec![forum_comment("up", 1, vec![]), forum_comment("down", 1, vec![])],
            ),
        MockEvents::new(),
        MockTrends::new(),
    )
    .with_scorer(FixedScorer::new().on_text("up", 4.0).on_text("down", -9.0));

    let comments = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .comments()
        .await
        .unwrap();

    assert!(comments
        .rows()
        .iter()
        .all(|c: &CommentRecord| (-1.0..=1.0).contains(&c.sentiment)));
}

#[tokio::test]
async fn thread_search_is_bounded() {
    let threads: Vec<_> = (0..150).map(|i| thread(&format!("t{i}"), "SUGA")).collect();
    let mut forum = MockForum::new().on_search("SUGA", threads);
    for i in 0..150 {
        forum = forum.on_thread(&format!("t{i}"), vec![forum_comment("hi", 1, vec![])]);
    }
    let mocks = MockProviders::new(MockCatalog::new(), MockVideo::new(), forum, MockEvents::new(), MockTrends::new());

    let comments = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .comments()
        .await
        .unwrap();

    assert_eq!(mocks.forum.last_limit(), Some(THREAD_SEARCH_LIMIT));
    assert_eq!(mocks.forum.comment_calls(), THREAD_SEARCH_LIMIT as usize);
    assert_eq!(comments.len(), THREAD_SEARCH_LIMIT as usize);
}

#[tokio::test]
async fn failing_thread_is_skipped_when_degrading() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new()
            .on_search("SUGA", vec![thread("ok", "a"), thread("gone", "b")])
            .on_thread("ok", vec![forum_comment("still here", 3, vec![])]),
        MockEvents::new(),
        MockTrends::new(),
    );

    let comments = aggregator(&mocks, suga(), FailurePolicy::Degrade)
        .comments()
        .await
        .unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments.rows()[0].body, "still here");
}

#[tokio::test]
async fn failing_thread_errors_when_propagating() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new()
            .on_search("SUGA", vec![thread("ok", "a"), thread("gone", "b")])
            .on_thread("ok", vec![forum_comment("still here", 3, vec![])]),
        MockEvents::new(),
        MockTrends::new(),
    );

    let err = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .comments()
        .await
        .unwrap_err();

    assert_eq!(err.provider(), Some(Provider::Forum));
}

#[tokio::test]
async fn no_threads_is_an_empty_comment_table() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new(),
    );

    let comments = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .comments()
        .await
        .unwrap();

    assert!(comments.is_empty());
    assert_eq!(comments.columns(), CommentRecord::COLUMNS);
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trend_points_carry_dates_and_partial_flags() {
    let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new().on_keyword(
            "SUGA",
            vec![interest(d(5), 61, false), interest(d(12), 100, false), interest(d(19), 48, true)],
        ),
    );

    let trends = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .trends()
        .await
        .unwrap();

    assert_eq!(
        trends.rows(),
        &[
            TrendPoint { date: d(5), interest: 61, is_partial: false },
            TrendPoint { date: d(12), interest: 100, is_partial: false },
            TrendPoint { date: d(19), interest: 48, is_partial: true },
        ]
    );
    assert_eq!(mocks.trends.last_timeframe().as_deref(), Some("today 3-m"));
}

#[tokio::test]
async fn trends_failure_follows_policy() {
    let mocks = MockProviders::new(
        MockCatalog::new(),
        MockVideo::new(),
        MockForum::new(),
        MockEvents::new(),
        MockTrends::new().failing(),
    );

    let degraded = aggregator(&mocks, suga(), FailurePolicy::Degrade).trends().await.unwrap();
    assert!(degraded.is_empty());
    assert_eq!(degraded.columns(), TrendPoint::COLUMNS);

    let err = aggregator(&mocks, suga(), FailurePolicy::Propagate)
        .trends()
        .await
        .unwrap_err();
    assert_eq!(err.provider(), Some(Provider::Trends));
}
