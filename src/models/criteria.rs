use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Category of dish suggested for the current weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishType {
    Soup,
    Beverage,
    Salad,
    Stew,
    #[serde(rename = "Main Course")]
    MainCourse,
    #[serde(rename = "Bread & Bakery")]
    BreadAndBakery,
    Dessert,
    Appetizer,
    #[serde(rename = "Side Dish")]
    SideDish,
    Snack,
}

impl DishType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishType::Soup => "Soup",
            DishType::Beverage => "Beverage",
            DishType::Salad => "Salad",
            DishType::Stew => "Stew",
            DishType::MainCourse => "Main Course",
            DishType::BreadAndBakery => "Bread & Bakery",
            DishType::Dessert => "Dessert",
            DishType::Appetizer => "Appetizer",
            DishType::SideDish => "Side Dish",
            DishType::Snack => "Snack",
        }
    }
}

/// Meal slot derived from the local hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meal {
    Breakfast,
    Lunch,
    #[serde(rename = "Tea Time")]
    TeaTime,
    Dinner,
    Supper,
    #[serde(rename = "Late Night")]
    LateNight,
}

impl Meal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::TeaTime => "Tea Time",
            Meal::Dinner => "Dinner",
            Meal::Supper => "Supper",
            Meal::LateNight => "Late Night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(DishType, Meal, Difficulty, Season);

/// The four categorical attributes derived from a weather reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCriteria {
    #[serde(rename = "type")]
    pub dish_type: DishType,
    pub meal: Meal,
    pub difficulty: Difficulty,
    pub season: Season,
}

/// Criteria as consumed by the recipe search.
///
/// Every field is optional so callers can search with a partial set; empty
/// strings are treated the same as absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(rename = "type", default)]
    pub dish_type: Option<String>,
    #[serde(default)]
    pub meal: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

impl SearchCriteria {
    pub fn dish_type(&self) -> Option<&str> {
        non_empty(&self.dish_type)
    }

    pub fn meal(&self) -> Option<&str> {
        non_empty(&self.meal)
    }

    pub fn difficulty(&self) -> Option<&str> {
        non_empty(&self.difficulty)
    }

    pub fn season(&self) -> Option<&str> {
        non_empty(&self.season)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl From<&RecommendationCriteria> for SearchCriteria {
    fn from(criteria: &RecommendationCriteria) -> Self {
        Self {
            dish_type: Some(criteria.dish_type.to_string()),
            meal: Some(criteria.meal.to_string()),
            difficulty: Some(criteria.difficulty.to_string()),
            season: Some(criteria.season.to_string()),
        }
    }
}
