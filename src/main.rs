use std::sync::Arc;

use mealcast_api::{
    config::Config,
    create_router,
    db::{self, Cache, InMemoryRecipeStore, PgRecipeStore, RecipeStore},
    services::providers::OpenWeatherProvider,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BUNDLED_CATALOG: &str = include_str!("../data/recipes.json");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn RecipeStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Using PostgreSQL recipe catalog");
            Arc::new(PgRecipeStore::new(pool))
        }
        None => {
            let store = InMemoryRecipeStore::from_json(BUNDLED_CATALOG)?;
            tracing::warn!(
                recipes = store.len(),
                "DATABASE_URL not set, using bundled in-memory catalog"
            );
            Arc::new(store)
        }
    };

    let mut provider =
        OpenWeatherProvider::new(config.weather_api_key.clone(), config.weather_api_url.clone());
    let mut cache_handle = None;
    if let Some(redis_url) = &config.redis_url {
        let (cache, handle) = Cache::new(db::create_redis_client(redis_url)?);
        provider = provider.with_cache(cache, config.observation_cache_ttl);
        cache_handle = Some(handle);
        tracing::info!(ttl = config.observation_cache_ttl, "Observation cache enabled");
    }

    let app = create_router(AppState::new(Arc::new(provider), store));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
