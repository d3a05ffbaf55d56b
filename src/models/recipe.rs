use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry as stored in the `recipes` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub dish_type: String,
    pub meal: String,
    pub difficulty: String,
    pub season: String,
    pub ingredients: Vec<String>,
    pub cook_time_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Value of one of the searchable fields
    pub fn field(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::DishType => &self.dish_type,
            RecipeField::Meal => &self.meal,
            RecipeField::Difficulty => &self.difficulty,
            RecipeField::Season => &self.season,
        }
    }
}

/// Searchable recipe attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    DishType,
    Meal,
    Difficulty,
    Season,
}

impl RecipeField {
    pub fn column(&self) -> &'static str {
        match self {
            RecipeField::DishType => "dish_type",
            RecipeField::Meal => "meal",
            RecipeField::Difficulty => "difficulty",
            RecipeField::Season => "season",
        }
    }
}

/// Case-insensitive substring clause on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: RecipeField,
    pub needle: String,
}

impl FieldMatch {
    pub fn new(field: RecipeField, needle: impl Into<String>) -> Self {
        Self {
            field,
            needle: needle.into(),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        recipe
            .field(self.field)
            .to_lowercase()
            .contains(&self.needle.to_lowercase())
    }
}

/// Predicate handed to a [`RecipeStore`](crate::db::RecipeStore).
///
/// A recipe matches when every `all_of` clause matches and, if `any_of` is
/// non-empty, at least one `any_of` clause matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub all_of: Vec<FieldMatch>,
    pub any_of: Vec<FieldMatch>,
    pub limit: usize,
}

impl RecipeQuery {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.all_of.iter().all(|clause| clause.matches(recipe))
            && (self.any_of.is_empty() || self.any_of.iter().any(|clause| clause.matches(recipe)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(dish_type: &str, season: &str) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            description: None,
            dish_type: dish_type.to_string(),
            meal: "Lunch".to_string(),
            difficulty: "Easy".to_string(),
            season: season.to_string(),
            ingredients: vec![],
            cook_time_minutes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_field_match_is_case_insensitive_substring() {
        let r = recipe("Vegetable Soup", "Winter");
        assert!(FieldMatch::new(RecipeField::DishType, "soup").matches(&r));
        assert!(FieldMatch::new(RecipeField::Season, "WINT").matches(&r));
        assert!(!FieldMatch::new(RecipeField::Meal, "Dinner").matches(&r));
    }

    #[test]
    fn test_query_requires_all_and_one_of_any() {
        let r = recipe("Soup", "Winter");
        let query = RecipeQuery {
            all_of: vec![FieldMatch::new(RecipeField::Difficulty, "Easy")],
            any_of: vec![
                FieldMatch::new(RecipeField::DishType, "Salad"),
                FieldMatch::new(RecipeField::Season, "Winter"),
            ],
            limit: 20,
        };
        assert!(query.matches(&r));

        let query = RecipeQuery {
            all_of: vec![FieldMatch::new(RecipeField::Difficulty, "Hard")],
            ..query
        };
        assert!(!query.matches(&r));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = RecipeQuery {
            all_of: vec![],
            any_of: vec![],
            limit: 20,
        };
        assert!(query.matches(&recipe("Snack", "Autumn")));
    }

    #[test]
    fn test_recipe_serializes_type_key() {
        let json = serde_json::to_value(recipe("Stew", "Winter")).unwrap();
        assert_eq!(json["type"], "Stew");
        assert!(json.get("dishType").is_none());
    }
}
