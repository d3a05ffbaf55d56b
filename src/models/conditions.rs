use chrono::{DateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Normalized weather reading consumed by the classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionObservation {
    /// Degrees Celsius, rounded
    pub temperature: i32,
    /// Short condition label, e.g. "Rain"
    pub description: String,
    /// Longer condition text, e.g. "light rain"
    pub details: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub cloud_cover: u8,
    /// Local hour of day at the observed location
    pub hour: u32,
}

impl ConditionObservation {
    /// Case-insensitive substring test against `description`
    pub fn description_mentions(&self, needles: &[&str]) -> bool {
        contains_any(&self.description, needles)
    }

    /// Case-insensitive substring test against `description` or `details`
    pub fn mentions(&self, needles: &[&str]) -> bool {
        contains_any(&self.description, needles) || contains_any(&self.details, needles)
    }

    /// Rejects readings outside the documented ranges
    pub fn validate(&self) -> AppResult<()> {
        if self.humidity > 100 {
            return Err(AppError::Validation(format!(
                "humidity must be within 0-100, got {}",
                self.humidity
            )));
        }
        if self.cloud_cover > 100 {
            return Err(AppError::Validation(format!(
                "cloudCover must be within 0-100, got {}",
                self.cloud_cover
            )));
        }
        if self.hour > 23 {
            return Err(AppError::Validation(format!(
                "hour must be within 0-23, got {}",
                self.hour
            )));
        }
        if !self.wind_speed.is_finite() {
            return Err(AppError::Validation("windSpeed must be finite".to_string()));
        }
        Ok(())
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle))
}

/// A validated latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Cache token with coordinates rounded to two decimals (roughly 1km)
    pub fn cache_token(&self) -> String {
        format!("{:.2},{:.2}", self.lat, self.lon)
    }
}

/// Request body for `POST /api/v1/recommendations`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl TryFrom<RecommendationRequest> for Coordinates {
    type Error = AppError;

    fn try_from(request: RecommendationRequest) -> Result<Self, Self::Error> {
        let (lat, lon) = match (request.lat, request.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AppError::Validation(
                    "Both lat and lon are required".to_string(),
                ))
            }
        };

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::Validation(format!(
                "lat must be within -90 to 90, got {}",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::Validation(format!(
                "lon must be within -180 to 180, got {}",
                lon
            )));
        }

        Ok(Coordinates { lat, lon })
    }
}

// ============================================================================
// OpenWeatherMap API Types
// ============================================================================

/// Raw response from `GET /data/2.5/weather`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrentWeather {
    #[serde(default)]
    pub weather: Vec<ApiWeatherCondition>,
    pub main: ApiMain,
    #[serde(default)]
    pub wind: Option<ApiWind>,
    #[serde(default)]
    pub clouds: Option<ApiClouds>,
    /// Observation time, unix seconds UTC
    pub dt: i64,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiWeatherCondition {
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiClouds {
    #[serde(default)]
    pub all: u8,
}

impl TryFrom<ApiCurrentWeather> for ConditionObservation {
    type Error = AppError;

    fn try_from(api: ApiCurrentWeather) -> Result<Self, Self::Error> {
        if !api.main.temp.is_finite() {
            return Err(AppError::ConditionUnavailable(
                "Temperature missing from weather response".to_string(),
            ));
        }

        let local_time = DateTime::from_timestamp(api.dt + api.timezone, 0).ok_or_else(|| {
            AppError::ConditionUnavailable(format!("Invalid observation time {}", api.dt))
        })?;

        let (description, details) = api
            .weather
            .into_iter()
            .next()
            .map(|condition| (condition.main, condition.description))
            .unwrap_or_default();

        Ok(ConditionObservation {
            temperature: api.main.temp.round() as i32,
            description,
            details,
            humidity: api.main.humidity,
            wind_speed: api.wind.map(|w| w.speed).unwrap_or(0.0),
            cloud_cover: api.clouds.map(|c| c.all).unwrap_or(0),
            hour: local_time.hour(),
        })
    }
}
