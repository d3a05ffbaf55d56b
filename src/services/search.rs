use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::RecipeStore,
    error::AppResult,
    models::{FieldMatch, Recipe, RecipeField, RecipeQuery, SearchCriteria, SearchOutcome, SearchStrategy},
};

/// Maximum results per pass and for the merged result
pub const MAX_RESULTS: usize = 20;

/// Sample size when every structured pass comes back empty
pub const RANDOM_SAMPLE_SIZE: usize = 10;

/// One structured pass of the cascade
pub struct Stage {
    pub strategy: SearchStrategy,
    /// Builds the pass's query; `None` skips the pass
    pub query: fn(&SearchCriteria) -> Option<RecipeQuery>,
    /// The cascade stops once the accumulation holds at least this many entries
    pub satisfied_at: usize,
}

/// Structured passes in escalation order. The random fallback runs after
/// these only if nothing at all was found.
pub const STAGES: &[Stage] = &[
    Stage {
        strategy: SearchStrategy::Exact,
        query: primary_query,
        satisfied_at: 5,
    },
    Stage {
        strategy: SearchStrategy::Flexible,
        query: flexible_query,
        satisfied_at: 3,
    },
    Stage {
        strategy: SearchStrategy::Broad,
        query: broad_query,
        satisfied_at: 1,
    },
];

fn clauses(pairs: &[(RecipeField, Option<&str>)]) -> Vec<FieldMatch> {
    pairs
        .iter()
        .filter_map(|(field, value)| value.map(|v| FieldMatch::new(*field, v)))
        .collect()
}

/// Every present field must match. Substring, not equality.
pub fn primary_query(criteria: &SearchCriteria) -> Option<RecipeQuery> {
    Some(RecipeQuery {
        all_of: clauses(&[
            (RecipeField::DishType, criteria.dish_type()),
            (RecipeField::Meal, criteria.meal()),
            (RecipeField::Difficulty, criteria.difficulty()),
            (RecipeField::Season, criteria.season()),
        ]),
        any_of: vec![],
        limit: MAX_RESULTS,
    })
}

/// Any of type, season or meal, still filtered by difficulty when given
pub fn flexible_query(criteria: &SearchCriteria) -> Option<RecipeQuery> {
    let any_of = clauses(&[
        (RecipeField::DishType, criteria.dish_type()),
        (RecipeField::Season, criteria.season()),
        (RecipeField::Meal, criteria.meal()),
    ]);
    if any_of.is_empty() {
        return None;
    }

    Some(RecipeQuery {
        all_of: clauses(&[(RecipeField::Difficulty, criteria.difficulty())]),
        any_of,
        limit: MAX_RESULTS,
    })
}

/// Any of type or season
pub fn broad_query(criteria: &SearchCriteria) -> Option<RecipeQuery> {
    let any_of = clauses(&[
        (RecipeField::DishType, criteria.dish_type()),
        (RecipeField::Season, criteria.season()),
    ]);
    if any_of.is_empty() {
        return None;
    }

    Some(RecipeQuery {
        all_of: vec![],
        any_of,
        limit: MAX_RESULTS,
    })
}

/// Recipes gathered so far, unique by id in first-seen order
#[derive(Debug, Default, Clone)]
pub struct Accumulation {
    entries: Vec<Recipe>,
    seen: HashSet<Uuid>,
}

impl Accumulation {
    /// Appends unseen recipes from `hits`, up to [`MAX_RESULTS`] in total
    pub fn absorb(mut self, hits: Vec<Recipe>) -> Self {
        for recipe in hits.into_iter().take(MAX_RESULTS) {
            if self.entries.len() >= MAX_RESULTS {
                break;
            }
            if self.seen.insert(recipe.id) {
                self.entries.push(recipe);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Recipe> {
        self.entries
    }
}

/// Cascading recipe search that always returns something when the catalog
/// is non-empty
#[derive(Clone)]
pub struct RecipeSearcher {
    store: Arc<dyn RecipeStore>,
}

impl RecipeSearcher {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Runs the structured passes in order, stopping as soon as a pass leaves
    /// enough results, and falls back to a random sample when nothing matched.
    /// A store failure in any pass aborts the whole search.
    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<SearchOutcome> {
        let mut accumulation = Accumulation::default();
        let mut strategy = SearchStrategy::Exact;

        for stage in STAGES {
            let Some(query) = (stage.query)(criteria) else {
                tracing::debug!(strategy = ?stage.strategy, "Skipping pass with no clauses");
                continue;
            };

            let hits = self.store.find(&query).await?;
            let before = accumulation.len();
            let hit_count = hits.len();
            accumulation = accumulation.absorb(hits);
            strategy = stage.strategy;

            tracing::info!(
                strategy = ?stage.strategy,
                store = self.store.name(),
                hits = hit_count,
                added = accumulation.len() - before,
                total = accumulation.len(),
                "Search pass completed"
            );

            if accumulation.len() >= stage.satisfied_at {
                break;
            }
        }

        let entries = if accumulation.is_empty() {
            strategy = SearchStrategy::Random;
            let sampled = self.store.sample(RANDOM_SAMPLE_SIZE).await?;
            tracing::info!(
                store = self.store.name(),
                sampled = sampled.len(),
                "No structured matches, returning random recipes"
            );
            sampled.into_iter().take(RANDOM_SAMPLE_SIZE).collect()
        } else {
            accumulation.into_entries()
        };

        Ok(SearchOutcome {
            total_count: entries.len(),
            entries,
            strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::recipes::MockRecipeStore;
    use crate::error::AppError;
    use chrono::Utc;
    use mockall::Sequence;

    fn recipe(title: &str) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            dish_type: "Soup".to_string(),
            meal: "Lunch".to_string(),
            difficulty: "Easy".to_string(),
            season: "Winter".to_string(),
            ingredients: vec![],
            cook_time_minutes: None,
            created_at: Utc::now(),
        }
    }

    fn recipes(prefix: &str, count: usize) -> Vec<Recipe> {
        (0..count).map(|i| recipe(&format!("{}-{}", prefix, i))).collect()
    }

    fn full_criteria() -> SearchCriteria {
        SearchCriteria {
            dish_type: Some("Soup".to_string()),
            meal: Some("Lunch".to_string()),
            difficulty: Some("Easy".to_string()),
            season: Some("Winter".to_string()),
        }
    }

    fn is_primary(query: &RecipeQuery) -> bool {
        query.any_of.is_empty()
    }

    fn is_flexible(query: &RecipeQuery) -> bool {
        query.any_of.len() == 3
    }

    fn is_broad(query: &RecipeQuery) -> bool {
        query.any_of.len() == 2 && query.all_of.is_empty()
    }

    fn searcher(store: MockRecipeStore) -> RecipeSearcher {
        RecipeSearcher::new(Arc::new(store))
    }

    fn mock_store() -> MockRecipeStore {
        let mut store = MockRecipeStore::new();
        store.expect_name().return_const("mock");
        store
    }

    #[test]
    fn test_primary_query_uses_every_present_field() {
        let query = primary_query(&full_criteria()).unwrap();
        assert_eq!(query.all_of.len(), 4);
        assert!(query.any_of.is_empty());
        assert_eq!(query.limit, MAX_RESULTS);
    }

    #[test]
    fn test_flexible_query_filters_by_difficulty() {
        let query = flexible_query(&full_criteria()).unwrap();
        let any_fields: Vec<_> = query.any_of.iter().map(|c| c.field).collect();
        assert_eq!(
            any_fields,
            vec![RecipeField::DishType, RecipeField::Season, RecipeField::Meal]
        );
        assert_eq!(
            query.all_of,
            vec![FieldMatch::new(RecipeField::Difficulty, "Easy")]
        );
    }

    #[test]
    fn test_flexible_query_skipped_without_or_fields() {
        let criteria = SearchCriteria {
            difficulty: Some("Hard".to_string()),
            ..Default::default()
        };
        assert!(flexible_query(&criteria).is_none());
        assert!(broad_query(&criteria).is_none());
    }

    #[test]
    fn test_broad_query_uses_type_and_season_only() {
        let query = broad_query(&full_criteria()).unwrap();
        let any_fields: Vec<_> = query.any_of.iter().map(|c| c.field).collect();
        assert_eq!(any_fields, vec![RecipeField::DishType, RecipeField::Season]);
        assert!(query.all_of.is_empty());
    }

    #[test]
    fn test_absorb_dedups_and_caps() {
        let first = recipes("a", 15);
        let mut second = first[..5].to_vec();
        second.extend(recipes("b", 10));

        let accumulation = Accumulation::default().absorb(first.clone()).absorb(second);
        let entries = accumulation.into_entries();

        assert_eq!(entries.len(), MAX_RESULTS);
        assert_eq!(entries[..15], first[..]);
        assert!(entries[15..].iter().all(|r| r.title.starts_with("b-")));
    }

    #[tokio::test]
    async fn test_primary_pass_sufficient() {
        let exact = recipes("exact", 6);
        let expected = exact.clone();

        let mut store = mock_store();
        store
            .expect_find()
            .withf(is_primary)
            .times(1)
            .returning(move |_| Ok(exact.clone()));
        store.expect_sample().never();

        let outcome = searcher(store).search(&full_criteria()).await.unwrap();

        assert_eq!(outcome.strategy, SearchStrategy::Exact);
        assert_eq!(outcome.total_count, 6);
        assert_eq!(outcome.entries, expected);
    }

    #[tokio::test]
    async fn test_flexible_pass_stops_cascade() {
        let exact = recipes("exact", 2);
        let flexible = recipes("flex", 5);

        let mut seq = Sequence::new();
        let mut store = mock_store();
        let exact_hits = exact.clone();
        store
            .expect_find()
            .withf(is_primary)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(exact_hits.clone()));
        let flexible_hits = flexible.clone();
        store
            .expect_find()
            .withf(is_flexible)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(flexible_hits.clone()));
        store.expect_find().withf(is_broad).never();
        store.expect_sample().never();

        let outcome = searcher(store).search(&full_criteria()).await.unwrap();

        assert_eq!(outcome.strategy, SearchStrategy::Flexible);
        assert_eq!(outcome.total_count, 7);
        assert_eq!(outcome.entries[..2], exact[..]);
        assert_eq!(outcome.entries[2..], flexible[..]);
    }

    #[tokio::test]
    async fn test_duplicate_keeps_primary_position() {
        let exact = recipes("exact", 2);
        let mut flexible = vec![exact[1].clone()];
        flexible.extend(recipes("flex", 2));
        flexible.push(exact[0].clone());

        let mut store = mock_store();
        let exact_hits = exact.clone();
        store
            .expect_find()
            .withf(is_primary)
            .returning(move |_| Ok(exact_hits.clone()));
        let flexible_hits = flexible.clone();
        store
            .expect_find()
            .withf(is_flexible)
            .returning(move |_| Ok(flexible_hits.clone()));

        let outcome = searcher(store).search(&full_criteria()).await.unwrap();

        let titles: Vec<_> = outcome.entries.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["exact-0", "exact-1", "flex-0", "flex-1"]);
        assert_eq!(outcome.strategy, SearchStrategy::Flexible);
    }

    #[tokio::test]
    async fn test_broad_pass_when_flexible_too_small() {
        let mut store = mock_store();
        store
            .expect_find()
            .withf(is_primary)
            .returning(|_| Ok(vec![]));
        store
            .expect_find()
            .withf(is_flexible)
            .returning(|_| Ok(recipes("flex", 1)));
        store
            .expect_find()
            .withf(is_broad)
            .times(1)
            .returning(|_| Ok(recipes("broad", 4)));
        store.expect_sample().never();

        let outcome = searcher(store).search(&full_criteria()).await.unwrap();

        assert_eq!(outcome.strategy, SearchStrategy::Broad);
        assert_eq!(outcome.total_count, 5);
        assert_eq!(outcome.entries[0].title, "flex-0");
    }

    #[tokio::test]
    async fn test_random_fallback_when_nothing_matches() {
        let mut store = mock_store();
        store.expect_find().times(3).returning(|_| Ok(vec![]));
        store
            .expect_sample()
            .withf(|count| *count == RANDOM_SAMPLE_SIZE)
            .times(1)
            .returning(|count| Ok(recipes("random", count)));

        let outcome = searcher(store).search(&full_criteria()).await.unwrap();

        assert_eq!(outcome.strategy, SearchStrategy::Random);
        assert_eq!(outcome.total_count, 10);
        assert!(outcome.entries.iter().all(|r| r.title.starts_with("random-")));
    }

    #[tokio::test]
    async fn test_merged_total_capped() {
        let mut store = mock_store();
        store
            .expect_find()
            .withf(is_primary)
            .returning(|_| Ok(recipes("exact", 4)));
        store
            .expect_find()
            .withf(is_flexible)
            .returning(|_| Ok(recipes("flex", 20)));

        let outcome = searcher(store).search(&full_criteria()).await.unwrap();

        assert_eq!(outcome.total_count, MAX_RESULTS);
        assert_eq!(outcome.entries.len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn test_store_error_aborts_search() {
        let mut store = mock_store();
        store
            .expect_find()
            .withf(is_primary)
            .returning(|_| Ok(recipes("exact", 1)));
        store
            .expect_find()
            .withf(is_flexible)
            .returning(|_| Err(AppError::StoreQuery("connection reset".to_string())));
        store.expect_find().withf(is_broad).never();
        store.expect_sample().never();

        let result = searcher(store).search(&full_criteria()).await;

        assert!(matches!(result, Err(AppError::StoreQuery(_))));
    }

    #[tokio::test]
    async fn test_empty_criteria_runs_primary_then_random() {
        let mut store = mock_store();
        store
            .expect_find()
            .withf(|q| q.all_of.is_empty() && q.any_of.is_empty())
            .times(1)
            .returning(|_| Ok(vec![]));
        store
            .expect_sample()
            .times(1)
            .returning(|_| Ok(recipes("random", 3)));

        let outcome = searcher(store).search(&SearchCriteria::default()).await.unwrap();

        assert_eq!(outcome.strategy, SearchStrategy::Random);
        assert_eq!(outcome.total_count, 3);
    }
}
