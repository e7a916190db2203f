use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::model::CurrentConditions;

use super::{FetchError, WeatherProvider};

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}{}", self.base_url, CURRENT_WEATHER_PATH)
    }
}

/// `cod` arrives as a number on success and as a string on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(u16),
    Text(String),
}

impl OwCode {
    fn is(&self, code: u16) -> bool {
        match self {
            OwCode::Number(n) => *n == code,
            OwCode::Text(s) => s.trim() == code.to_string(),
        }
    }
}

impl std::fmt::Display for OwCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwCode::Number(n) => write!(f, "{n}"),
            OwCode::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    cod: Option<OwCode>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition_code = parsed.weather.into_iter().next().map(|w| w.icon);

        CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country,
            latitude: parsed.coord.lat,
            longitude: parsed.coord.lon,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            condition_code,
            observed_at: parsed.dt.and_then(unix_to_utc),
        }
    }
}

/// Classify a response body. The transport status is ignored; only the payload counts.
fn parse_current(body: &str) -> Result<CurrentConditions, FetchError> {
    let status: OwStatus = serde_json::from_str(body)
        .map_err(|e| FetchError::Failure(format!("malformed OpenWeather body: {e}")))?;

    match status.cod {
        Some(ref cod) if cod.is(404) => return Err(FetchError::CityNotFound),
        Some(ref cod) if !cod.is(200) => {
            return Err(FetchError::Failure(format!(
                "OpenWeather returned code {cod}: {}",
                status.message.as_deref().unwrap_or("no message"),
            )));
        }
        _ => {}
    }

    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Failure(format!("unexpected OpenWeather payload: {e}")))?;

    Ok(parsed.into())
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let url = self.current_url();
        debug!(url = %url, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Failure(format!("request to OpenWeather failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Failure(format!("failed to read OpenWeather body: {e}")))?;

        debug!(%status, bytes = body.len(), "OpenWeather responded");

        parse_current(&body).inspect_err(|err| {
            if !matches!(err, FetchError::CityNotFound) {
                warn!(%status, body = %truncate_body(&body), "Unusable OpenWeather response");
            }
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
