use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use wavewatch_core::Recommendation;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsQuery {
    pub location: Option<String>,
}

/// GET /api/v1/recommendations?location=<text>
///
/// Loads every sample whose location contains the query text, used as given,
/// and ranks the carriers found there. A blank query is rejected.
pub(super) async fn list_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<ApiResponse<Vec<Recommendation>>>, ApiError> {
    let location = query
        .location
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "location query parameter is required",
            )
        })?;

    let samples = wavewatch_db::list_samples_for_location(&state.pool, location)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = wavewatch_core::recommend_providers(&samples);

    tracing::info!(
        location,
        samples = samples.len(),
        carriers = data.len(),
        "served carrier recommendations"
    );

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
