use std::sync::Arc;

use rand::seq::IndexedRandom;

use crate::{
    db::RecipeStore,
    error::{AppError, AppResult},
    models::{Recipe, RecipeQuery},
};

/// Recipe catalog held in memory, in insertion order
#[derive(Clone, Default)]
pub struct InMemoryRecipeStore {
    recipes: Arc<Vec<Recipe>>,
}

impl InMemoryRecipeStore {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Arc::new(recipes),
        }
    }

    /// Loads a catalog from a JSON array of recipes
    pub fn from_json(json: &str) -> AppResult<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Invalid recipe catalog: {}", e)))?;
        Ok(Self::new(recipes))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[async_trait::async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| query.matches(recipe))
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn sample(&self, count: usize) -> AppResult<Vec<Recipe>> {
        let mut rng = rand::rng();
        Ok(self
            .recipes
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
