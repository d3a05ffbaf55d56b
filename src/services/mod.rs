pub mod classifier;
pub mod providers;
pub mod recommendations;
pub mod search;

pub use providers::ConditionProvider;
pub use search::RecipeSearcher;
