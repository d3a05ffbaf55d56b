use crate::{
    error::AppResult,
    models::{
        ConditionObservation, Coordinates, RecommendationCriteria, RecommendationRequest,
        RecommendationResponse, SearchCriteria, SearchOutcome,
    },
    services::{classifier, providers::ConditionProvider, search::RecipeSearcher},
};

/// Generates weather-based recipe recommendations
///
/// Validates the coordinates, fetches the current weather, derives recipe
/// criteria from it and runs the cascading search. Validation happens before
/// any provider call; a provider failure stops the flow before the search.
pub async fn recommend_for_location(
    provider: &dyn ConditionProvider,
    searcher: &RecipeSearcher,
    request: RecommendationRequest,
) -> AppResult<RecommendationResponse> {
    let coordinates = Coordinates::try_from(request)?;

    let observation = provider.current_conditions(coordinates).await?;
    let criteria = classifier::classify(&observation);
    let outcome = searcher.search(&SearchCriteria::from(&criteria)).await?;

    tracing::info!(
        provider = provider.name(),
        strategy = ?outcome.strategy,
        total = outcome.total_count,
        "Recommendations assembled"
    );

    Ok(assemble(observation, criteria, outcome))
}

/// Combines the reading, the derived criteria and the search result
pub fn assemble(
    observation: ConditionObservation,
    criteria: RecommendationCriteria,
    outcome: SearchOutcome,
) -> RecommendationResponse {
    RecommendationResponse {
        entries: outcome.entries,
        observation,
        criteria,
        strategy: outcome.strategy,
        total_count: outcome.total_count,
    }
}
