//! Timetable index.
//!
//! Stops, trips, footpaths and the scan-ordered connection array, built once
//! from normalized schedule data and shared read-only across queries.

mod error;
mod footpaths;
mod index;
mod model;

pub use error::ScheduleError;
pub use footpaths::FootpathsBuilder;
pub use index::TimetableIndex;
pub use model::{
    Connection, Footpath, FootpathInput, Stop, StopInput, StopTime, StopTimeInput, Trip,
    TripInput,
};
