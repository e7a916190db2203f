//! Query state holder.
//!
//! [`App`] owns the search text, the last successful [`WeatherSnapshot`] and the
//! [`RequestStatus`]. A search is split into [`App::begin_search`] and
//! [`App::complete`] so that callers which overlap requests still get the result
//! of the most recently issued one; [`App::search`] runs both back to back.

use tracing::{debug, error, info, instrument, warn};

use crate::{
    icon::IconResolver,
    model::{CurrentConditions, WeatherSnapshot},
    provider::{FetchError, WeatherProvider},
};

/// Fixed user-facing message for any transport or parse failure.
pub const FETCH_ERROR_MESSAGE: &str = "Error While Fetching Data!";

#[derive(Debug, Clone, PartialEq)]
pub enum RequestStatus {
    /// Nothing has been searched yet.
    Idle,
    Loading,
    NotFound,
    Error(String),
    Success(WeatherSnapshot),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }
}

/// Identifies one issued search. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug)]
pub struct App {
    provider: Box<dyn WeatherProvider>,
    icons: IconResolver,
    query: String,
    snapshot: WeatherSnapshot,
    status: RequestStatus,
    last_issued: u64,
}

impl App {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        icons: IconResolver,
        initial_query: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            icons,
            query: initial_query.into(),
            snapshot: WeatherSnapshot::default(),
            status: RequestStatus::Idle,
            last_issued: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// Last successfully fetched weather; untouched by failed searches.
    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    /// Mark a search for the current query as in flight.
    pub fn begin_search(&mut self) -> (SearchTicket, String) {
        self.last_issued += 1;
        self.status = RequestStatus::Loading;
        (SearchTicket(self.last_issued), self.query.clone())
    }

    /// Apply a fetch outcome. Returns `false` (and changes nothing) when a newer
    /// search has been issued since `ticket`.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<CurrentConditions, FetchError>,
    ) -> bool {
        if ticket.0 != self.last_issued {
            debug!(ticket = ticket.0, latest = self.last_issued, "Discarding stale search result");
            return false;
        }

        self.status = match outcome {
            Ok(conditions) => {
                let icon = self.icons.resolve_opt(conditions.condition_code.as_deref());
                let snapshot = WeatherSnapshot::from_conditions(conditions, icon);

                info!(city = %snapshot.city, temp = snapshot.temperature, "Weather updated");
                self.query = snapshot.city.clone();
                self.snapshot = snapshot.clone();
                RequestStatus::Success(snapshot)
            }
            Err(FetchError::CityNotFound) => {
                warn!(query = %self.query, "City not found");
                RequestStatus::NotFound
            }
            Err(FetchError::Failure(detail)) => {
                error!(%detail, "Weather fetch failed");
                RequestStatus::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };

        true
    }

    /// Search for the current query and wait for the outcome.
    #[instrument(skip(self), fields(query = %self.query))]
    pub async fn search(&mut self) -> &RequestStatus {
        let (ticket, query) = self.begin_search();
        let outcome = self.provider.current_by_city(&query).await;
        self.complete(ticket, outcome);
        &self.status
    }
}
