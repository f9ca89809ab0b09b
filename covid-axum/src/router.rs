use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use covid::{RawQueryParams, RecordBatch, RecordPage, RecordService, RequestError};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Requests still running after this are answered with `408` and dropped,
    /// which cancels the in-flight database call.
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit: 32 * 1024 * 1024,
        }
    }
}

pub fn router(service: RecordService, config: &RouterConfig) -> Router {
    Router::new()
        .route("/api/v1/records", get(get_records).post(post_records))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn get_records(
    State(service): State<RecordService>,
    query: Result<Query<RawQueryParams>, QueryRejection>,
) -> ApiResult<Json<RecordPage>> {
    let Query(raw) = query.map_err(|e| RequestError::validation(e.body_text()))?;
    let page = service.get_records(&raw).await?;

    Ok(Json(page))
}

async fn post_records(
    State(service): State<RecordService>,
    payload: Result<Json<RecordBatch>, JsonRejection>,
) -> ApiResult<(StatusCode, &'static str)> {
    let Json(batch) = payload.map_err(|e| RequestError::validation(e.body_text()))?;
    service.save_records(batch.records).await?;

    Ok((StatusCode::CREATED, "Created"))
}
