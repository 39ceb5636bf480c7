use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::warn;

use artistpulse_aggregator::views;
use artistpulse_aggregator::{AggregatorError, ArtistProfileAggregator};

use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct TopQuery {
    top: Option<usize>,
}

// --- Errors ---

/// Maps aggregation errors onto HTTP statuses.
pub struct ApiError(AggregatorError);

impl From<AggregatorError> for ApiError {
    fn from(err: AggregatorError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AggregatorError::InvalidArtistName(_) => StatusCode::BAD_REQUEST,
            AggregatorError::IdentityNotFound(_) => StatusCode::NOT_FOUND,
            AggregatorError::ProviderCall { .. } | AggregatorError::MalformedUpstreamShape { .. } => {
                warn!(error = %self.0, "Upstream failure");
                StatusCode::BAD_GATEWAY
            }
        };
        let body = serde_json::json!({
            "error": self.0.to_string(),
            "provider": self.0.provider(),
        });
        (status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<serde_json::Value>, ApiError>;

async fn session(state: &AppState, name: &str) -> Result<ArtistProfileAggregator, ApiError> {
    Ok(ArtistProfileAggregator::new(name, state.providers.clone(), state.options).await?)
}

// --- Handlers ---

pub async fn api_artist_overview(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> ApiResult {
    let agg = session(&state, &name).await?;
    let (channel, events) = tokio::join!(agg.channel_stats(), agg.events());
    let channel = channel?;
    let metrics = views::quick_metrics(agg.identity(), &channel, &events);
    Ok(Json(serde_json::json!({
        "identity": agg.identity(),
        "metrics": metrics,
    })))
}

pub async fn api_artist_tracks(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<TopQuery>,
) -> ApiResult {
    let agg = session(&state, &name).await?;
    let tracks = agg.tracks().await?;
    let top = params.top.unwrap_or(views::DEFAULT_TOP_TRACKS);
    Ok(Json(serde_json::json!({
        "tracks": tracks,
        "top_tracks": views::top_tracks(&tracks, top),
        "popularity_by_release_date": views::popularity_by_release_date(&tracks),
        "duration_summary": views::duration_summary(&tracks),
    })))
}

pub async fn api_artist_channel(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> ApiResult {
    let agg = session(&state, &name).await?;
    let channel = agg.channel_stats().await?;
    Ok(Json(serde_json::json!({
        "channel": channel,
        "metric_bars": views::channel_metric_bars(&channel),
    })))
}

pub async fn api_artist_comments(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<TopQuery>,
) -> ApiResult {
    let agg = session(&state, &name).await?;
    let comments = agg.comments().await?;
    let top = params.top.unwrap_or(views::DEFAULT_TOP_COMMENTS);
    Ok(Json(serde_json::json!({
        "comments": comments,
        "sentiment_histogram": views::sentiment_histogram(&comments, views::SENTIMENT_BINS),
        "top_comments": views::top_comments(&comments, top),
    })))
}

pub async fn api_artist_events(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> ApiResult {
    let agg = session(&state, &name).await?;
    let events = agg.events().await;
    Ok(Json(serde_json::json!({
        "events": events,
        "events_per_city": views::events_per_city(&events),
    })))
}

pub async fn api_artist_trends(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> ApiResult {
    let agg = session(&state, &name).await?;
    let trends = agg.trends().await?;
    Ok(Json(serde_json::json!({ "trends": trends })))
}

pub async fn api_artist_snapshot(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> ApiResult {
    let agg = session(&state, &name).await?;
    let snapshot = agg.snapshot().await;
    Ok(Json(serde_json::to_value(&snapshot).unwrap_or_default()))
}
