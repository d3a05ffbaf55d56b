use crate::models::{ConditionObservation, Difficulty, DishType, Meal, RecommendationCriteria, Season};

/// A single `(predicate, value)` entry in an ordered rule table
pub struct Rule<T> {
    pub name: &'static str,
    pub applies: fn(&ConditionObservation) -> bool,
    pub value: T,
}

/// Dish type rules, highest priority first
pub const DISH_TYPE_RULES: &[Rule<DishType>] = &[
    Rule {
        name: "rain_or_drizzle",
        applies: |o: &ConditionObservation| o.mentions(&["rain", "drizzle"]),
        value: DishType::Soup,
    },
    Rule {
        name: "hot",
        applies: |o: &ConditionObservation| o.temperature > 30,
        value: DishType::Beverage,
    },
    Rule {
        name: "warm",
        applies: |o: &ConditionObservation| o.temperature > 25,
        value: DishType::Salad,
    },
    Rule {
        name: "freezing",
        applies: |o: &ConditionObservation| o.temperature < 5,
        value: DishType::Stew,
    },
    Rule {
        name: "cold",
        applies: |o: &ConditionObservation| o.temperature < 10,
        value: DishType::Soup,
    },
    Rule {
        name: "clear_or_sunny",
        applies: |o: &ConditionObservation| o.description_mentions(&["clear", "sun"]),
        value: DishType::MainCourse,
    },
    Rule {
        name: "mild_clouds",
        applies: |o: &ConditionObservation| o.description_mentions(&["cloud"]) && o.temperature > 15,
        value: DishType::BreadAndBakery,
    },
    Rule {
        name: "fog_or_mist",
        applies: |o: &ConditionObservation| o.mentions(&["fog", "mist"]),
        value: DishType::Dessert,
    },
    Rule {
        name: "snow",
        applies: |o: &ConditionObservation| o.description_mentions(&["snow"]),
        value: DishType::Beverage,
    },
    Rule {
        name: "humid",
        applies: |o: &ConditionObservation| o.humidity > 80,
        value: DishType::Appetizer,
    },
    Rule {
        name: "windy",
        applies: |o: &ConditionObservation| o.wind_speed > 20.0,
        value: DishType::SideDish,
    },
];

/// Half-open `[start, end)` hour range
pub struct HourRange {
    pub start: u32,
    pub end: u32,
    pub meal: Meal,
}

impl HourRange {
    /// Literal half-open test; a wrapping range such as `[23, 1)` never matches.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }
}

pub const MEAL_RANGES: &[HourRange] = &[
    HourRange { start: 8, end: 11, meal: Meal::Breakfast },
    HourRange { start: 11, end: 16, meal: Meal::Lunch },
    HourRange { start: 16, end: 20, meal: Meal::TeaTime },
    HourRange { start: 20, end: 23, meal: Meal::Dinner },
    HourRange { start: 23, end: 1, meal: Meal::Supper },
];

pub const DIFFICULTY_RULES: &[Rule<Difficulty>] = &[
    Rule {
        name: "clear_and_warm",
        applies: |o: &ConditionObservation| o.description_mentions(&["clear"]) && o.temperature > 20,
        value: Difficulty::Hard,
    },
    Rule {
        name: "rain_snow_or_cold",
        applies: |o: &ConditionObservation| {
            o.description_mentions(&["rain", "snow"]) || o.temperature < 10
        },
        value: Difficulty::Easy,
    },
];

/// Evaluates `rules` in order and returns the value of the first that applies
pub fn first_match<T: Copy + std::fmt::Debug>(
    attribute: &'static str,
    rules: &[Rule<T>],
    observation: &ConditionObservation,
    fallback: T,
) -> T {
    match rules.iter().find(|rule| (rule.applies)(observation)) {
        Some(rule) => {
            tracing::debug!(attribute = attribute, rule = rule.name, value = ?rule.value, "Rule matched");
            rule.value
        }
        None => {
            tracing::debug!(attribute = attribute, value = ?fallback, "No rule matched, using fallback");
            fallback
        }
    }
}

pub fn classify_dish_type(observation: &ConditionObservation) -> DishType {
    first_match("type", DISH_TYPE_RULES, observation, DishType::Snack)
}

pub fn classify_meal(hour: u32) -> Meal {
    MEAL_RANGES
        .iter()
        .find(|range| range.contains(hour))
        .map(|range| range.meal)
        .unwrap_or(Meal::LateNight)
}

pub fn classify_difficulty(observation: &ConditionObservation) -> Difficulty {
    first_match("difficulty", DIFFICULTY_RULES, observation, Difficulty::Medium)
}

fn base_season(temperature: i32) -> Season {
    match temperature {
        t if t < 5 => Season::Winter,
        t if t < 15 => Season::Spring,
        t if t < 25 => Season::Summer,
        _ => Season::Autumn,
    }
}

/// Season from temperature, adjusted for very humid or very dry air
pub fn classify_season(observation: &ConditionObservation) -> Season {
    let base = base_season(observation.temperature);
    let temperature = observation.temperature;

    if observation.humidity > 80 {
        if temperature > 10 {
            Season::Summer
        } else {
            base
        }
    } else if observation.humidity < 30 {
        if temperature > 20 {
            Season::Summer
        } else if temperature > 10 {
            Season::Spring
        } else {
            Season::Winter
        }
    } else {
        base
    }
}

/// Maps a weather reading to recipe criteria. Total and deterministic.
pub fn classify(observation: &ConditionObservation) -> RecommendationCriteria {
    let criteria = RecommendationCriteria {
        dish_type: classify_dish_type(observation),
        meal: classify_meal(observation.hour),
        difficulty: classify_difficulty(observation),
        season: classify_season(observation),
    };

    tracing::info!(
        temperature = observation.temperature,
        description = %observation.description,
        hour = observation.hour,
        dish_type = %criteria.dish_type,
        meal = %criteria.meal,
        difficulty = %criteria.difficulty,
        season = %criteria.season,
        "Classified weather conditions"
    );

    criteria
}
