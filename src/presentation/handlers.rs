// HTTP request handlers
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_HOURS: i32 = 6;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub hours: Option<i32>,
}

#[derive(Deserialize)]
pub struct TimelineQueryParams {
    pub source: String,
    pub hours: Option<i32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List configured timelines
pub async fn list_timelines(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let timelines = state.timeline_service.list_timelines();

    match json_response(&timelines, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// One risk-zoned timeline for a source
pub async fn get_timeline(
    Path(id): Path<String>,
    Query(query): Query<TimelineQueryParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let hours = query.hours.unwrap_or(DEFAULT_HOURS);

    match state
        .timeline_service
        .get_timeline(&id, &query.source, hours)
        .await
    {
        Ok(Some(chart)) => match json_response(&chart, accepts_brotli(&headers)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Ok(None) => (StatusCode::NOT_FOUND, format!("unknown timeline: {}", id)).into_response(),
        Err(e) => {
            tracing::error!("Error loading timeline {} for {}: {:#}", id, query.source, e);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

/// Stream every timeline of a source (progressive loading)
pub async fn stream_board(
    Path(source): Path<String>,
    Query(query): Query<RangeQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let hours = query.hours.unwrap_or(DEFAULT_HOURS);

    let rx = state.streaming_service.stream_board(&source, hours).await;
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}
