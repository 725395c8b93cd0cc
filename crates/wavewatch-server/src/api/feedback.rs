use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wavewatch_core::NewFeedback;
use wavewatch_db::FeedbackRow;

use crate::middleware::RequestId;

use super::{
    map_db_error, map_validation_error, normalize_limit, normalize_offset, ApiError, ApiResponse,
    AppState, ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct FeedbackQuery {
    pub carrier: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct FeedbackItem {
    pub id: Uuid,
    pub overall_satisfaction: i16,
    pub response_time: i16,
    pub usability: i16,
    pub comments: Option<String>,
    pub issue_type: Option<String>,
    pub carrier: String,
    pub network_type: Option<String>,
    pub location: String,
    pub signal_strength: Option<i32>,
    pub download_speed: Option<f64>,
    pub upload_speed: Option<f64>,
    pub latency: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}

impl From<FeedbackRow> for FeedbackItem {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.public_id,
            overall_satisfaction: row.overall_satisfaction,
            response_time: row.response_time,
            usability: row.usability,
            comments: row.comments,
            issue_type: row.issue_type,
            carrier: row.carrier,
            network_type: row.network_type,
            location: row.location,
            signal_strength: row.signal_strength,
            download_speed: row.download_speed,
            upload_speed: row.upload_speed,
            latency: row.latency,
            submitted_at: row.submitted_at,
        }
    }
}

/// POST /api/v1/feedback
pub(super) async fn create_feedback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<NewFeedback>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackItem>>), ApiError> {
    body.validate()
        .map_err(|e| map_validation_error(&req_id.0, &e))?;

    let row = wavewatch_db::insert_feedback(&state.pool, &body)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(id = %row.public_id, carrier = %row.carrier, "feedback submitted");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: FeedbackItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/feedback, newest first, with an optional `carrier` filter.
pub(super) async fn list_feedback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<ApiResponse<Vec<FeedbackItem>>>, ApiError> {
    let carrier = query
        .carrier
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let rows = wavewatch_db::list_feedback(
        &state.pool,
        carrier,
        normalize_limit(query.limit),
        normalize_offset(query.offset),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(FeedbackItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
