//! Arrive-by journey planner.
//!
//! Answers "when is the latest I can leave this stop and still be at that
//! one by a given time?" with a reversed connection scan: one backward pass
//! over the timetable's connections fills per-stop latest departures, and
//! the journey is rebuilt forward from the origin by following parent links.

mod config;
mod query;
mod reconstruct;
mod scan;

#[cfg(test)]
mod fixtures;

pub use config::PlannerConfig;
pub use query::{Planner, Query, QueryError, QueryOutcome, find_journey};
pub use reconstruct::{NoPathError, reconstruct};
pub use scan::{Parent, ScanState, ScanStats, TripExit, scan};
