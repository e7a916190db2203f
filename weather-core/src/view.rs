//! Text rendering of the request status.

use std::fmt;

use crate::{app::RequestStatus, icon::Icon, model::WeatherSnapshot};

pub const NOT_FOUND_MESSAGE: &str = "City not found";

/// The one branch visible for a given status.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Idle,
    Loading,
    NotFound,
    Error(&'a str),
    Details(&'a WeatherSnapshot),
}

impl<'a> View<'a> {
    pub fn from_status(status: &'a RequestStatus) -> Self {
        match status {
            RequestStatus::Idle => View::Idle,
            RequestStatus::Loading => View::Loading,
            RequestStatus::NotFound => View::NotFound,
            RequestStatus::Error(message) => View::Error(message),
            RequestStatus::Success(snapshot) => View::Details(snapshot),
        }
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Idle => f.write_str("Type a city name and press Enter."),
            View::Loading => f.write_str("Loading..."),
            View::NotFound => write!(f, "{}  {NOT_FOUND_MESSAGE}", Icon::Cloud.glyph()),
            View::Error(message) => write!(f, "✖  {message}"),
            View::Details(snap) => {
                writeln!(f, "{}  {}", snap.icon.glyph(), snap.icon)?;
                writeln!(f, "{}°C", snap.temperature)?;
                writeln!(f, "{}", snap.city.to_uppercase())?;
                writeln!(f, "{}", snap.country.to_uppercase())?;
                writeln!(f, "Latitude   {}", snap.latitude)?;
                writeln!(f, "Longitude  {}", snap.longitude)?;
                writeln!(f, "Humidity   {}%", snap.humidity)?;
                write!(f, "Wind Speed {} m/s", snap.wind_speed)?;
                if let Some(at) = snap.observed_at {
                    write!(f, "\nObserved   {}", at.format("%Y-%m-%d %H:%M UTC"))?;
                }
                Ok(())
            }
        }
    }
}
