use serde::{Deserialize, Serialize};

pub mod conditions;
pub mod criteria;
pub mod recipe;

pub use conditions::{ConditionObservation, Coordinates, RecommendationRequest};
pub use criteria::{Difficulty, DishType, Meal, RecommendationCriteria, Season, SearchCriteria};
pub use recipe::{FieldMatch, Recipe, RecipeField, RecipeQuery};

/// Which pass of the cascade produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    Exact,
    Flexible,
    Broad,
    Random,
}

/// Recipes returned by a cascading search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Unique by id, in order of the pass that first returned them
    pub entries: Vec<Recipe>,
    pub strategy: SearchStrategy,
    pub total_count: usize,
}

/// Response for `POST /api/v1/recommendations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub entries: Vec<Recipe>,
    pub observation: ConditionObservation,
    pub criteria: RecommendationCriteria,
    pub strategy: SearchStrategy,
    pub total_count: usize,
}
