use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};

use crate::{
    db::RecipeStore,
    error::{AppError, AppResult},
    models::{FieldMatch, Recipe, RecipeQuery},
};

const RECIPE_COLUMNS: &str = "id, title, description, dish_type, meal, difficulty, season, \
                              ingredients, cook_time_minutes, created_at";

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Schema plus the seed catalog mirrored from `data/recipes.json`
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies pending migrations, including the seed catalog
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Recipe catalog backed by the `recipes` table
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE metacharacters so needles match literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, clause: &FieldMatch) {
    builder
        .push(clause.field.column())
        .push(" ILIKE ")
        .push_bind(format!("%{}%", escape_like(&clause.needle)))
        .push(" ESCAPE '\\'");
}

/// Builds the SELECT for a recipe query
fn build_find_query(query: &RecipeQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM recipes WHERE TRUE", RECIPE_COLUMNS));

    for clause in &query.all_of {
        builder.push(" AND ");
        push_clause(&mut builder, clause);
    }

    if !query.any_of.is_empty() {
        builder.push(" AND (");
        for (i, clause) in query.any_of.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            push_clause(&mut builder, clause);
        }
        builder.push(")");
    }

    builder
        .push(" ORDER BY created_at, id LIMIT ")
        .push_bind(query.limit as i64);

    builder
}

/// Builds the SELECT for a uniform random sample
fn build_sample_query(count: usize) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM recipes ORDER BY random() LIMIT ",
        RECIPE_COLUMNS
    ));
    builder.push_bind(count as i64);
    builder
}

#[async_trait::async_trait]
impl RecipeStore for PgRecipeStore {
    async fn find(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>> {
        let mut builder = build_find_query(query);

        builder
            .build_query_as::<Recipe>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::StoreQuery(e.to_string()))
    }

    async fn sample(&self, count: usize) -> AppResult<Vec<Recipe>> {
        let mut builder = build_sample_query(count);

        builder
            .build_query_as::<Recipe>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::StoreQuery(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
