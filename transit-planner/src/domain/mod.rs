//! Domain types for the transit planner.
//!
//! Times, compact ids and the journey model. Journeys enforce their
//! invariants at construction, so code that receives one can trust that it
//! is time-consistent end to end.

mod error;
mod ids;
mod journey;
mod time;

pub use error::JourneyError;
pub use ids::{ConnectionIdx, FootpathIdx, StopIdx, TripIdx};
pub use journey::{Journey, Leg, Ride, Walk};
pub use time::{TimeError, TransitTime};
