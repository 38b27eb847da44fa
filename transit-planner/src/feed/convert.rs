//! Conversion from feed DTOs to timetable inputs.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::TransitTime;
use crate::timetable::{
    FootpathInput, FootpathsBuilder, StopInput, StopTimeInput, TimetableIndex, TripInput,
};

use super::error::FeedError;
use super::types::{FeedDocument, FeedStopTime, FeedTrip};

/// Timetable inputs converted from a feed, ready for `TimetableIndex::build`.
#[derive(Debug, Clone)]
pub struct FeedInputs {
    pub service_date: NaiveDate,
    pub stops: Vec<StopInput>,
    pub footpaths: Vec<FootpathInput>,
    pub trips: Vec<TripInput>,
}

/// Convert a parsed feed document to timetable inputs.
///
/// Symmetric footpaths are expanded into both directions.
pub fn to_inputs(doc: &FeedDocument) -> Result<FeedInputs, FeedError> {
    let service_date = NaiveDate::parse_from_str(&doc.service_date, "%Y-%m-%d")
        .map_err(|_| FeedError::ServiceDate(doc.service_date.clone()))?;

    let stops = doc
        .stops
        .iter()
        .map(|s| StopInput::new(s.id.as_str(), s.name.as_str()))
        .collect();

    let footpaths = doc
        .footpaths
        .iter()
        .fold(FootpathsBuilder::new(), |builder, f| {
            if f.symmetric {
                builder.add_symmetric(&f.from, &f.to, f.duration_mins)
            } else {
                builder.add(&f.from, &f.to, f.duration_mins)
            }
        })
        .build();

    let trips = doc
        .trips
        .iter()
        .map(|trip| convert_trip(trip, service_date))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeedInputs {
        service_date,
        stops,
        footpaths,
        trips,
    })
}

fn convert_trip(trip: &FeedTrip, service_date: NaiveDate) -> Result<TripInput, FeedError> {
    let stop_times = trip
        .stop_times
        .iter()
        .enumerate()
        .map(|(position, call)| convert_stop_time(&trip.id, position, call, service_date))
        .collect::<Result<Vec<_>, _>>()?;

    let input = TripInput::new(trip.id.as_str(), stop_times);
    Ok(match &trip.mode {
        Some(mode) => input.with_mode(mode.as_str()),
        None => input,
    })
}

fn convert_stop_time(
    trip: &str,
    position: usize,
    call: &FeedStopTime,
    service_date: NaiveDate,
) -> Result<StopTimeInput, FeedError> {
    let parse = |s: &str| {
        TransitTime::parse(s, service_date).map_err(|source| FeedError::Time {
            trip: trip.to_string(),
            position,
            source,
        })
    };

    let (arrival, departure) = match (&call.arrival, &call.departure) {
        (Some(arr), Some(dep)) => (parse(arr)?, parse(dep)?),
        (Some(arr), None) => {
            let arr = parse(arr)?;
            (arr, arr)
        }
        (None, Some(dep)) => {
            let dep = parse(dep)?;
            (dep, dep)
        }
        (None, None) => {
            return Err(FeedError::MissingTime {
                trip: trip.to_string(),
                position,
            });
        }
    };

    Ok(StopTimeInput::new(call.stop.as_str(), arrival, departure))
}

/// A loaded feed: its index and the date its times are relative to.
#[derive(Debug)]
pub struct Feed {
    pub service_date: NaiveDate,
    pub index: TimetableIndex,
}

/// Parse a feed from JSON text and build its index.
pub fn load_from_str(json: &str) -> Result<Feed, FeedError> {
    let doc: FeedDocument = serde_json::from_str(json)?;
    let inputs = to_inputs(&doc)?;

    debug!(
        service_date = %inputs.service_date,
        stops = inputs.stops.len(),
        trips = inputs.trips.len(),
        footpaths = inputs.footpaths.len(),
        "feed converted"
    );

    let index = TimetableIndex::build(inputs.stops, inputs.footpaths, inputs.trips)?;

    Ok(Feed {
        service_date: inputs.service_date,
        index,
    })
}

/// Read a feed file and build its index.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Feed, FeedError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let feed = load_from_str(&json)?;

    info!(
        path = %path.display(),
        service_date = %feed.service_date,
        stops = feed.index.stop_count(),
        connections = feed.index.connection_count(),
        "timetable loaded"
    );

    Ok(feed)
}
