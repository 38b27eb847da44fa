//! Arrive-by queries against a timetable index.

use tracing::debug;

use crate::domain::{Journey, StopIdx, TransitTime};
use crate::timetable::TimetableIndex;

use super::config::PlannerConfig;
use super::reconstruct::{NoPathError, reconstruct};
use super::scan::scan;

/// Error from answering a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// An origin or destination id the index doesn't know
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// The scan reached the origin but no journey could be rebuilt
    #[error(transparent)]
    NoPath(#[from] NoPathError),
}

/// Result of a query that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The journey leaving the origin as late as possible.
    Found(Journey),
    /// Nothing reaches the destination by the deadline.
    NoJourneyFound,
}

impl QueryOutcome {
    pub fn journey(&self) -> Option<&Journey> {
        match self {
            QueryOutcome::Found(journey) => Some(journey),
            QueryOutcome::NoJourneyFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found(_))
    }
}

/// A query with its stops resolved to compact ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub origin: StopIdx,
    pub destination: StopIdx,
    pub arrive_by: TransitTime,
}

impl Query {
    /// Resolve external stop ids.
    pub fn resolve(
        index: &TimetableIndex,
        origin: &str,
        destination: &str,
        arrive_by: TransitTime,
    ) -> Result<Self, QueryError> {
        let lookup = |id: &str| {
            index
                .stop_idx(id)
                .ok_or_else(|| QueryError::UnknownStop(id.to_string()))
        };

        Ok(Self {
            origin: lookup(origin)?,
            destination: lookup(destination)?,
            arrive_by,
        })
    }
}

/// Answers queries against one index with one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    index: &'a TimetableIndex,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    pub fn new(index: &'a TimetableIndex, config: &'a PlannerConfig) -> Self {
        Self { index, config }
    }

    /// Find the latest departure from `origin` arriving at `destination` by
    /// `arrive_by`.
    ///
    /// # Errors
    ///
    /// `UnknownStop` if either id isn't in the index. `NoPath` only if the
    /// scan tables are inconsistent.
    pub fn find_journey(
        &self,
        origin: &str,
        destination: &str,
        arrive_by: TransitTime,
    ) -> Result<QueryOutcome, QueryError> {
        let query = Query::resolve(self.index, origin, destination, arrive_by)?;
        self.plan(&query)
    }

    /// Answer an already resolved query.
    pub fn plan(&self, query: &Query) -> Result<QueryOutcome, QueryError> {
        if query.origin == query.destination {
            debug!(stop = %self.index.stop(query.origin).id, "origin is destination");
            return Ok(QueryOutcome::Found(Journey::stay(
                query.origin,
                query.arrive_by,
            )));
        }

        let state = scan(self.index, self.config, query.destination, query.arrive_by);

        let outcome = match state.best(query.origin) {
            None => QueryOutcome::NoJourneyFound,
            Some(_) => QueryOutcome::Found(reconstruct(self.index, &state, query.origin)?),
        };

        debug!(
            origin = %self.index.stop(query.origin).id,
            destination = %self.index.stop(query.destination).id,
            arrive_by = %query.arrive_by,
            found = outcome.is_found(),
            departure = ?outcome.journey().map(|j| j.departure_time().to_string()),
            "query answered"
        );

        Ok(outcome)
    }
}

/// Answer a query with the default configuration.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::TransitTime;
/// use transit_planner::planner::{find_journey, QueryOutcome};
/// use transit_planner::timetable::{StopInput, StopTimeInput, TimetableIndex, TripInput};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let t = |s: &str| TransitTime::parse(s, date).unwrap();
///
/// let index = TimetableIndex::build(
///     vec![StopInput::new("A", "Alpha"), StopInput::new("B", "Beta")],
///     vec![],
///     vec![TripInput::new(
///         "T1",
///         vec![
///             StopTimeInput::new("A", t("08:00"), t("08:00")),
///             StopTimeInput::new("B", t("08:30"), t("08:30")),
///         ],
///     )],
/// )
/// .unwrap();
///
/// let outcome = find_journey(&index, "A", "B", t("09:00")).unwrap();
/// let QueryOutcome::Found(journey) = outcome else { panic!() };
/// assert_eq!(journey.departure_time(), t("08:00"));
/// ```
pub fn find_journey(
    index: &TimetableIndex,
    origin: &str,
    destination: &str,
    arrive_by: TransitTime,
) -> Result<QueryOutcome, QueryError> {
    Planner::new(index, &PlannerConfig::default()).find_journey(origin, destination, arrive_by)
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
