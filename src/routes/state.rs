use std::sync::Arc;

use crate::{
    db::RecipeStore,
    services::{ConditionProvider, RecipeSearcher},
};

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ConditionProvider>,
    pub searcher: RecipeSearcher,
}

impl AppState {
    pub fn new(provider: Arc<dyn ConditionProvider>, store: Arc<dyn RecipeStore>) -> Self {
        Self {
            provider,
            searcher: RecipeSearcher::new(store),
        }
    }
}
