use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wavewatch_core::NewNetworkLog;
use wavewatch_db::NetworkLogRow;

use crate::middleware::RequestId;

use super::{
    map_db_error, map_validation_error, normalize_limit, normalize_offset, ApiError, ApiResponse,
    AppState, ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct NetworkLogsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct NetworkLogItem {
    pub id: Uuid,
    pub carrier: String,
    pub network_type: Option<String>,
    pub signal_strength: Option<i32>,
    pub download_speed: Option<f64>,
    pub upload_speed: Option<f64>,
    pub latency: Option<i32>,
    pub jitter: Option<f64>,
    pub packet_loss: Option<f64>,
    pub location: String,
    pub device_info: Option<String>,
    pub app_version: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl From<NetworkLogRow> for NetworkLogItem {
    fn from(row: NetworkLogRow) -> Self {
        Self {
            id: row.public_id,
            carrier: row.carrier,
            network_type: row.network_type,
            signal_strength: row.signal_strength,
            download_speed: row.download_speed,
            upload_speed: row.upload_speed,
            latency: row.latency,
            jitter: row.jitter,
            packet_loss: row.packet_loss,
            location: row.location,
            device_info: row.device_info,
            app_version: row.app_version,
            recorded_at: row.recorded_at,
        }
    }
}

/// POST /api/v1/network-logs: store one telemetry sample.
pub(super) async fn create_network_log(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<NewNetworkLog>,
) -> Result<(StatusCode, Json<ApiResponse<NetworkLogItem>>), ApiError> {
    body.validate()
        .map_err(|e| map_validation_error(&req_id.0, &e))?;

    let row = wavewatch_db::insert_network_log(&state.pool, &body)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        id = %row.public_id,
        carrier = %row.carrier,
        location = %row.location,
        "network log submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: NetworkLogItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/network-logs, newest first.
pub(super) async fn list_network_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NetworkLogsQuery>,
) -> Result<Json<ApiResponse<Vec<NetworkLogItem>>>, ApiError> {
    let rows = wavewatch_db::list_network_logs(
        &state.pool,
        normalize_limit(query.limit),
        normalize_offset(query.offset),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(NetworkLogItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/network-logs/{id}
pub(super) async fn get_network_log(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NetworkLogItem>>, ApiError> {
    let public_id = Uuid::parse_str(&id).map_err(|_| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("'{id}' is not a valid network log id"),
        )
    })?;

    let row = wavewatch_db::get_network_log(&state.pool, public_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: NetworkLogItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
