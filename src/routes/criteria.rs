use axum::{extract::rejection::JsonRejection, Json};

use crate::{
    error::AppResult,
    models::{ConditionObservation, RecommendationCriteria},
    services::classifier,
};

/// Handler that classifies a supplied observation without searching
pub async fn classify(
    payload: Result<Json<ConditionObservation>, JsonRejection>,
) -> AppResult<Json<RecommendationCriteria>> {
    let Json(observation) = payload?;
    observation.validate()?;
    Ok(Json(classifier::classify(&observation)))
}
