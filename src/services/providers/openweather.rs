//! OpenWeatherMap current weather provider
//!
//! Calls `GET /data/2.5/weather` in metric units and normalizes the response
//! into a [`ConditionObservation`]. Readings are optionally cached in Redis,
//! keyed by coordinates rounded to two decimals.

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{conditions::ApiCurrentWeather, ConditionObservation, Coordinates},
    services::providers::ConditionProvider,
};
use reqwest::Client as HttpClient;

const DEFAULT_CACHE_TTL: u64 = 600; // 10 minutes

#[derive(Clone)]
pub struct OpenWeatherProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Enables read-through caching of observations
    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    async fn fetch_observation(&self, at: Coordinates) -> AppResult<ConditionObservation> {
        let url = format!("{}/data/2.5/weather", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("lat", at.lat.to_string()),
                ("lon", at.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ConditionUnavailable(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ConditionUnavailable(format!(
                "Weather API returned status {}: {}",
                status, body
            )));
        }

        let api: ApiCurrentWeather = response.json().await.map_err(|e| {
            AppError::ConditionUnavailable(format!("Malformed weather response: {}", e))
        })?;
        let observation = ConditionObservation::try_from(api)?;

        tracing::info!(
            lat = at.lat,
            lon = at.lon,
            temperature = observation.temperature,
            description = %observation.description,
            provider = "openweather",
            "Weather observation fetched"
        );

        Ok(observation)
    }
}

#[async_trait::async_trait]
impl ConditionProvider for OpenWeatherProvider {
    async fn current_conditions(&self, at: Coordinates) -> AppResult<ConditionObservation> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::Observation(at.cache_token()),
                self.cache_ttl,
                self.fetch_observation(at)
            ),
            None => self.fetch_observation(at).await,
        }
    }

    fn name(&self) -> &'static str {
        "openweather"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider = OpenWeatherProvider::new("key".to_string(), "http://test.local/".to_string());
        assert_eq!(provider.api_url, "http://test.local");
        assert!(provider.cache.is_none());
        assert_eq!(provider.cache_ttl, DEFAULT_CACHE_TTL);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_condition_unavailable() {
        // Port 9 (discard) is not expected to serve HTTP.
        let provider = OpenWeatherProvider::new("key".to_string(), "http://127.0.0.1:9".to_string());
        let result = provider
            .current_conditions(Coordinates { lat: 0.0, lon: 0.0 })
            .await;

        assert!(matches!(result, Err(AppError::ConditionUnavailable(_))));
    }
}
