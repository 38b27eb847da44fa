//! Schedule records: the normalized input handed to the index builder, and
//! the resolved forms the index stores.

use chrono::Duration;

use crate::domain::{FootpathIdx, StopIdx, TransitTime, TripIdx};

/// A stop as supplied by the data-loading collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopInput {
    pub id: String,
    pub name: String,
}

impl StopInput {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One call of a trip at a stop, with external stop id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimeInput {
    pub stop: String,
    pub arrival: TransitTime,
    pub departure: TransitTime,
}

impl StopTimeInput {
    pub fn new(stop: impl Into<String>, arrival: TransitTime, departure: TransitTime) -> Self {
        Self {
            stop: stop.into(),
            arrival,
            departure,
        }
    }
}

/// A scheduled vehicle run, calls in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripInput {
    pub id: String,
    /// Mode of transport, e.g. "bus" or "train"
    pub mode: Option<String>,
    pub stop_times: Vec<StopTimeInput>,
}

impl TripInput {
    pub fn new(id: impl Into<String>, stop_times: Vec<StopTimeInput>) -> Self {
        Self {
            id: id.into(),
            mode: None,
            stop_times,
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

/// A directed walking transfer with external stop ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootpathInput {
    pub from: String,
    pub to: String,
    pub duration: Duration,
}

/// A stop in the index, with the footpaths touching it.
#[derive(Debug, Clone)]
pub struct Stop {
    /// External stop id
    pub id: String,
    /// Display name
    pub name: String,
    /// Footpaths leaving this stop
    pub footpaths_out: Vec<FootpathIdx>,
    /// Footpaths arriving at this stop
    pub footpaths_in: Vec<FootpathIdx>,
}

/// A call of a trip at a resolved stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub stop: StopIdx,
    pub arrival: TransitTime,
    pub departure: TransitTime,
}

/// A trip in the index.
#[derive(Debug, Clone)]
pub struct Trip {
    /// External trip id
    pub id: String,
    /// Mode of transport, if the feed names one
    pub mode: Option<String>,
    /// Calls in travel order
    pub stop_times: Vec<StopTime>,
}

/// Elementary trip segment between two consecutive calls.
///
/// `position` is the index of the departure call within the trip, so the
/// arrival call sits at `position + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub trip: TripIdx,
    pub position: usize,
    pub from: StopIdx,
    pub departure: TransitTime,
    pub to: StopIdx,
    pub arrival: TransitTime,
}

/// A directed walking transfer between resolved stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footpath {
    pub from: StopIdx,
    pub to: StopIdx,
    pub duration: Duration,
}
