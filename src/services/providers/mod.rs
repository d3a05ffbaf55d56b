//! Weather condition providers
//!
//! The recommendation flow only needs a normalized [`ConditionObservation`] for a
//! pair of coordinates. Providers hide where that reading comes from so the
//! classifier and search can be exercised with fakes.

use crate::{
    error::AppResult,
    models::{ConditionObservation, Coordinates},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current weather readings
#[async_trait::async_trait]
pub trait ConditionProvider: Send + Sync {
    /// Current conditions at the given coordinates.
    ///
    /// Unreachable providers and malformed responses are reported as
    /// `AppError::ConditionUnavailable`.
    async fn current_conditions(&self, at: Coordinates) -> AppResult<ConditionObservation>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
