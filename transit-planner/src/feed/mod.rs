//! Schedule feed loading.
//!
//! The timetable arrives as one JSON document naming a service date, stops,
//! trips with `HH:MM[:SS]` stop times relative to that date, and footpaths in
//! minutes. Loading converts it to timetable inputs and builds the index.

mod convert;
mod error;
mod types;

pub use convert::{Feed, FeedInputs, load_from_path, load_from_str, to_inputs};
pub use error::FeedError;
pub use types::{FeedDocument, FeedFootpath, FeedStop, FeedStopTime, FeedTrip};
