use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use artistpulse_aggregator::{AggregatorOptions, Providers};

pub mod dashboard;
pub mod rest;

pub struct AppState {
    pub providers: Providers,
    pub options: AggregatorOptions,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/artists/{name}", get(rest::api_artist_overview))
        .route("/api/artists/{name}/tracks", get(rest::api_artist_tracks))
        .route("/api/artists/{name}/channel", get(rest::api_artist_channel))
        .route("/api/artists/{name}/comments", get(rest::api_artist_comments))
        .route("/api/artists/{name}/events", get(rest::api_artist_events))
        .route("/api/artists/{name}/trends", get(rest::api_artist_trends))
        .route("/api/artists/{name}/snapshot", get(rest::api_artist_snapshot))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Upstream data changes constantly; never cache
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
