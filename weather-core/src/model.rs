use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::DEFAULT_CITY, icon::Icon};

/// Raw reading as returned by a provider, before display shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    /// Provider condition code, e.g. `"10d"`. `None` when the payload had no entry.
    pub condition_code: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Everything shown for the most recently resolved city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Whole degrees Celsius, floored.
    pub temperature: i64,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon: Icon,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    pub fn from_conditions(conditions: CurrentConditions, icon: Icon) -> Self {
        Self {
            temperature: conditions.temperature_c.floor() as i64,
            city: conditions.city,
            country: conditions.country,
            latitude: conditions.latitude,
            longitude: conditions.longitude,
            humidity: conditions.humidity_pct,
            wind_speed: conditions.wind_speed,
            icon,
            observed_at: conditions.observed_at,
        }
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature: 0,
            city: DEFAULT_CITY.to_string(),
            country: "in".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            humidity: 0,
            wind_speed: 0.0,
            icon: Icon::Clear,
            observed_at: None,
        }
    }
}
