//! Timetable fixtures shared by the planner tests.

use chrono::NaiveDate;

use crate::domain::TransitTime;
use crate::timetable::{FootpathInput, StopInput, StopTimeInput, TimetableIndex, TripInput};

pub(crate) fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub(crate) fn time(s: &str) -> TransitTime {
    TransitTime::parse(s, date()).unwrap()
}

/// Build a trip from (stop, arrival, departure); an empty arrival means the
/// vehicle departs as soon as it arrives, an empty departure that it doesn't
/// wait either.
pub(crate) fn trip(id: &str, calls: &[(&str, &str, &str)]) -> TripInput {
    let stop_times = calls
        .iter()
        .map(|(stop, arr, dep)| {
            let (arr, dep) = match (arr.is_empty(), dep.is_empty()) {
                (true, false) => (time(dep), time(dep)),
                (false, true) => (time(arr), time(arr)),
                _ => (time(arr), time(dep)),
            };
            StopTimeInput::new(*stop, arr, dep)
        })
        .collect();
    TripInput::new(id, stop_times)
}

pub(crate) fn index(
    stops: &[&str],
    footpaths: Vec<FootpathInput>,
    trips: Vec<TripInput>,
) -> TimetableIndex {
    let stops = stops
        .iter()
        .map(|id| StopInput::new(*id, format!("Stop {id}")))
        .collect();
    TimetableIndex::build(stops, footpaths, trips).unwrap()
}
