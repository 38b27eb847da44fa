//! Schedule validation errors.

/// A schedule that violates the ordering or reference invariants the scan
/// relies on. Raised once, while building the index; no index is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Two stops share an id
    #[error("duplicate stop id {0}")]
    DuplicateStop(String),

    /// Two trips share an id
    #[error("duplicate trip id {0}")]
    DuplicateTrip(String),

    /// A trip needs at least two stop times to form a connection
    #[error("trip {trip} calls at fewer than two stops")]
    TooFewStops { trip: String },

    /// A stop time names a stop that doesn't exist
    #[error("trip {trip} references unknown stop {stop} at position {position}")]
    UnknownStop {
        trip: String,
        position: usize,
        stop: String,
    },

    /// A footpath endpoint names a stop that doesn't exist
    #[error("footpath references unknown stop {stop}")]
    UnknownFootpathStop { stop: String },

    /// A stop time departs before it arrives
    #[error("trip {trip} departs before it arrives at position {position}")]
    DwellReversed { trip: String, position: usize },

    /// A stop time arrives no later than the previous departure
    #[error("trip {trip} stop times are not strictly increasing at position {position}")]
    NonIncreasingTimes { trip: String, position: usize },

    /// A footpath takes negative time
    #[error("footpath from {from} to {to} has a negative duration")]
    NegativeWalk { from: String, to: String },
}
