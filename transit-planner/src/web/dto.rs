//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Journey, Leg, StopIdx, TransitTime};
use crate::timetable::{Stop, TimetableIndex};

/// A stop in the stop list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StopResult {
    /// External stop id
    pub id: String,

    /// Display name
    pub name: String,
}

/// Response for the stop list.
#[derive(Debug, Serialize, Deserialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

/// Request to plan an arrive-by journey.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    /// Origin stop id
    pub origin: String,

    /// Destination stop id
    pub destination: String,

    /// Latest arrival in HH:MM or HH:MM:SS format
    pub arrive_by: String,

    /// Date `arrive_by` is relative to, `YYYY-MM-DD` (defaults to the feed's service date)
    pub date: Option<String>,
}

/// Response for journey planning.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanJourneyResponse {
    /// Whether a journey arrives in time
    pub found: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey: Option<JourneyResult>,
}

/// A planned journey.
#[derive(Debug, Serialize, Deserialize)]
pub struct JourneyResult {
    /// Departure time from origin
    pub departure_time: String,

    /// Arrival time at destination
    pub arrival_time: String,

    /// Total duration in minutes
    pub duration_mins: i64,

    /// Number of changes between rides
    pub transfers: usize,

    pub legs: Vec<LegResult>,
}

/// Kind of a journey leg.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    Ride,
    Walk,
}

/// A leg of a journey.
#[derive(Debug, Serialize, Deserialize)]
pub struct LegResult {
    pub kind: LegKind,

    /// Boarding or walk start stop id
    pub from_stop: String,

    /// Alighting or walk end stop id
    pub to_stop: String,

    pub departure_time: String,

    pub arrival_time: String,

    /// Trip id, for rides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,

    /// Mode of transport, for rides whose trip names one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Stop> for StopResult {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
        }
    }
}

impl PlanJourneyResponse {
    pub fn not_found() -> Self {
        Self {
            found: false,
            journey: None,
        }
    }

    pub fn found(journey: JourneyResult) -> Self {
        Self {
            found: true,
            journey: Some(journey),
        }
    }
}

impl JourneyResult {
    /// Create from a domain Journey, naming stops and trips by external id.
    pub fn from_journey(journey: &Journey, index: &TimetableIndex) -> Self {
        Self {
            departure_time: format_time(&journey.departure_time()),
            arrival_time: format_time(&journey.arrival_time()),
            duration_mins: journey.total_duration().num_minutes(),
            transfers: journey.transfer_count(),
            legs: journey
                .legs()
                .iter()
                .map(|leg| LegResult::from_leg(leg, index))
                .collect(),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg, index: &TimetableIndex) -> Self {
        let kind = match leg {
            Leg::Ride(_) => LegKind::Ride,
            Leg::Walk(_) => LegKind::Walk,
        };

        Self {
            kind,
            from_stop: stop_id(index, leg.from_stop()),
            to_stop: stop_id(index, leg.to_stop()),
            departure_time: format_time(&leg.departure()),
            arrival_time: format_time(&leg.arrival()),
            trip_id: leg.trip().map(|t| index.trip(t).id.clone()),
            mode: leg.as_ride().and_then(|ride| ride.mode.clone()),
        }
    }
}

fn stop_id(index: &TimetableIndex, stop: StopIdx) -> String {
    index.stop(stop).id.clone()
}

/// Format a TransitTime as "HH:MM", or "HH:MM:SS" with seconds.
fn format_time(time: &TransitTime) -> String {
    time.to_string()
}
