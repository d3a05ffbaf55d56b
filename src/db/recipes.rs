use crate::{
    error::AppResult,
    models::{Recipe, RecipeQuery},
};

/// Read-only access to the recipe catalog
///
/// Implementations must apply `RecipeQuery` with case-insensitive substring
/// semantics and honor its `limit`. Ordering of `find` results should be
/// stable so the cascade's first-seen ordering is reproducible.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecipeStore: Send + Sync {
    /// Recipes matching the query, at most `query.limit` of them
    async fn find(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>>;

    /// Up to `count` recipes chosen at random
    async fn sample(&self, count: usize) -> AppResult<Vec<Recipe>>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
