//! The immutable timetable index.
//!
//! Built once from normalized schedule data, then shared read-only by every
//! query. Stops and trips get compact ids in input order; connections are
//! derived from trips and stored in scan order (departure descending, then
//! trip id, then position), which is the order a single backward pass needs.

use std::collections::HashMap;

use chrono::Duration;
use tracing::{debug, trace};

use crate::domain::{ConnectionIdx, FootpathIdx, StopIdx, TripIdx};

use super::error::ScheduleError;
use super::model::{
    Connection, Footpath, FootpathInput, Stop, StopInput, StopTime, Trip, TripInput,
};

/// Read-only timetable shared across queries.
#[derive(Debug)]
pub struct TimetableIndex {
    stops: Vec<Stop>,
    trips: Vec<Trip>,
    connections: Vec<Connection>,
    footpaths: Vec<Footpath>,
    stop_ids: HashMap<String, StopIdx>,
    trip_ids: HashMap<String, TripIdx>,
}

impl TimetableIndex {
    /// Validate the schedule and build the index.
    ///
    /// # Errors
    ///
    /// Returns a `ScheduleError` naming the offending stop, trip or footpath
    /// if ids repeat, a reference is dangling, a footpath is negative, or a
    /// trip's stop times are not strictly increasing.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::TransitTime;
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
    /// assert_eq!(index.connection_count(), 1);
    /// ```
    pub fn build(
        stops: Vec<StopInput>,
        footpaths: Vec<FootpathInput>,
        trips: Vec<TripInput>,
    ) -> Result<Self, ScheduleError> {
        let mut stop_ids = HashMap::with_capacity(stops.len());
        let mut indexed_stops = Vec::with_capacity(stops.len());

        for stop in stops {
            let idx = StopIdx(indexed_stops.len());
            if stop_ids.insert(stop.id.clone(), idx).is_some() {
                return Err(ScheduleError::DuplicateStop(stop.id));
            }
            indexed_stops.push(Stop {
                id: stop.id,
                name: stop.name,
                footpaths_out: Vec::new(),
                footpaths_in: Vec::new(),
            });
        }

        let mut indexed_footpaths = Vec::with_capacity(footpaths.len());
        for footpath in footpaths {
            let from = resolve_footpath_stop(&stop_ids, &footpath.from)?;
            let to = resolve_footpath_stop(&stop_ids, &footpath.to)?;

            if footpath.duration < Duration::zero() {
                return Err(ScheduleError::NegativeWalk {
                    from: footpath.from,
                    to: footpath.to,
                });
            }
            if from == to {
                trace!(stop = %footpath.from, "dropping footpath loop");
                continue;
            }

            let idx = FootpathIdx(indexed_footpaths.len());
            indexed_stops[from.0].footpaths_out.push(idx);
            indexed_stops[to.0].footpaths_in.push(idx);
            indexed_footpaths.push(Footpath {
                from,
                to,
                duration: footpath.duration,
            });
        }

        let mut trip_ids = HashMap::with_capacity(trips.len());
        let mut indexed_trips = Vec::with_capacity(trips.len());
        let mut connections = Vec::new();

        for trip in trips {
            let trip_idx = TripIdx(indexed_trips.len());
            if trip_ids.insert(trip.id.clone(), trip_idx).is_some() {
                return Err(ScheduleError::DuplicateTrip(trip.id));
            }

            let stop_times = resolve_stop_times(&stop_ids, &trip)?;

            for (position, pair) in stop_times.windows(2).enumerate() {
                connections.push(Connection {
                    trip: trip_idx,
                    position,
                    from: pair[0].stop,
                    departure: pair[0].departure,
                    to: pair[1].stop,
                    arrival: pair[1].arrival,
                });
            }

            indexed_trips.push(Trip {
                id: trip.id,
                mode: trip.mode,
                stop_times,
            });
        }

        connections.sort_by(|a, b| {
            b.departure
                .cmp(&a.departure)
                .then(a.trip.cmp(&b.trip))
                .then(a.position.cmp(&b.position))
        });

        debug!(
            stops = indexed_stops.len(),
            trips = indexed_trips.len(),
            connections = connections.len(),
            footpaths = indexed_footpaths.len(),
            "timetable index built"
        );

        Ok(Self {
            stops: indexed_stops,
            trips: indexed_trips,
            connections,
            footpaths: indexed_footpaths,
            stop_ids,
            trip_ids,
        })
    }

    /// Look up a stop's compact id.
    pub fn stop_idx(&self, id: &str) -> Option<StopIdx> {
        self.stop_ids.get(id).copied()
    }

    /// Returns the stop with the given compact id.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was not issued by this index.
    pub fn stop(&self, idx: StopIdx) -> &Stop {
        &self.stops[idx.0]
    }

    /// Returns all stops in id order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Look up a trip's compact id.
    pub fn trip_idx(&self, id: &str) -> Option<TripIdx> {
        self.trip_ids.get(id).copied()
    }

    /// Returns the trip with the given compact id.
    pub fn trip(&self, idx: TripIdx) -> &Trip {
        &self.trips[idx.0]
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Returns connections in scan order: departure descending, ties broken
    /// by trip then position. Trips compare by compact id, which follows
    /// input order rather than the external id.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, idx: ConnectionIdx) -> &Connection {
        &self.connections[idx.0]
    }

    pub fn footpath(&self, idx: FootpathIdx) -> &Footpath {
        &self.footpaths[idx.0]
    }

    pub fn footpaths(&self) -> &[Footpath] {
        &self.footpaths
    }

    /// Footpaths ending at `stop`.
    pub fn footpaths_into(&self, stop: StopIdx) -> impl Iterator<Item = (FootpathIdx, &Footpath)> {
        self.stops[stop.0]
            .footpaths_in
            .iter()
            .map(|&idx| (idx, &self.footpaths[idx.0]))
    }

    /// Footpaths starting at `stop`.
    pub fn footpaths_from(&self, stop: StopIdx) -> impl Iterator<Item = (FootpathIdx, &Footpath)> {
        self.stops[stop.0]
            .footpaths_out
            .iter()
            .map(|&idx| (idx, &self.footpaths[idx.0]))
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn footpath_count(&self) -> usize {
        self.footpaths.len()
    }
}

fn resolve_footpath_stop(
    stop_ids: &HashMap<String, StopIdx>,
    id: &str,
) -> Result<StopIdx, ScheduleError> {
    stop_ids
        .get(id)
        .copied()
        .ok_or_else(|| ScheduleError::UnknownFootpathStop {
            stop: id.to_string(),
        })
}

/// Resolve a trip's stop ids and check its times move strictly forward.
fn resolve_stop_times(
    stop_ids: &HashMap<String, StopIdx>,
    trip: &TripInput,
) -> Result<Vec<StopTime>, ScheduleError> {
    if trip.stop_times.len() < 2 {
        return Err(ScheduleError::TooFewStops {
            trip: trip.id.clone(),
        });
    }

    let mut resolved: Vec<StopTime> = Vec::with_capacity(trip.stop_times.len());

    for (position, call) in trip.stop_times.iter().enumerate() {
        let stop = stop_ids
            .get(&call.stop)
            .copied()
            .ok_or_else(|| ScheduleError::UnknownStop {
                trip: trip.id.clone(),
                position,
                stop: call.stop.clone(),
            })?;

        if call.departure < call.arrival {
            return Err(ScheduleError::DwellReversed {
                trip: trip.id.clone(),
                position,
            });
        }

        if let Some(prev) = resolved.last() {
            if call.arrival <= prev.departure {
                return Err(ScheduleError::NonIncreasingTimes {
                    trip: trip.id.clone(),
                    position,
                });
            }
        }

        resolved.push(StopTime {
            stop,
            arrival: call.arrival,
            departure: call.departure,
        });
    }

    Ok(resolved)
}
