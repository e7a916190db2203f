//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather fetch client behind the [`WeatherProvider`] trait
//! - Condition code to icon resolution
//! - The query state holder and its text view
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod app;
pub mod config;
pub mod icon;
pub mod model;
pub mod provider;
pub mod view;

pub use app::{App, FETCH_ERROR_MESSAGE, RequestStatus, SearchTicket};
pub use config::Config;
pub use icon::{Icon, IconResolver};
pub use model::{CurrentConditions, WeatherSnapshot};
pub use provider::{FetchError, WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use view::View;
