pub mod memory;
pub mod postgres;
pub mod recipes;
pub mod redis;

pub use memory::InMemoryRecipeStore;
pub use postgres::{create_pool, run_migrations, PgRecipeStore};
pub use recipes::RecipeStore;
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
