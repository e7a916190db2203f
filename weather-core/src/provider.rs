use crate::{Config, model::CurrentConditions, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Why a single search produced no weather.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider answered, but says it doesn't know the city.
    #[error("City not found")]
    CityNotFound,

    /// Transport failure, malformed body, or any other provider error payload.
    #[error("Failed to fetch weather: {0}")]
    Failure(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name, exactly as the user typed it.
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        config.base_url.clone(),
        std::time::Duration::from_secs(config.timeout_secs),
    )?;

    Ok(Box::new(provider))
}
