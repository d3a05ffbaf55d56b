use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    tracing::info!(
        request_id = %request_id,
        lat = ?request.lat,
        lon = ?request.lon,
        "Processing recommendation request"
    );

    let response =
        recommendations::recommend_for_location(state.provider.as_ref(), &state.searcher, request)
            .await?;

    tracing::info!(
        request_id = %request_id,
        strategy = ?response.strategy,
        total = response.total_count,
        "Recommendation completed"
    );

    Ok(Json(response))
}
