use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{SearchCriteria, SearchOutcome},
    routes::AppState,
};

/// Handler for recipe search with caller-supplied criteria
///
/// Runs the same cascade as recommendations; any of `type`, `meal`,
/// `difficulty` and `season` may be omitted.
pub async fn search(
    State(state): State<AppState>,
    Query(criteria): Query<SearchCriteria>,
) -> AppResult<Json<SearchOutcome>> {
    let outcome = state.searcher.search(&criteria).await?;
    Ok(Json(outcome))
}
