//! Domain error types.
//!
//! These errors represent journeys that break their own time or connectivity
//! invariants. They are distinct from schedule and query errors.

use super::{StopIdx, TransitTime};

/// Errors from assembling a journey out of legs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    /// Consecutive legs don't share a stop
    #[error("leg {index} starts at stop {found} but the previous leg ends at stop {expected}")]
    Disconnected {
        index: usize,
        expected: StopIdx,
        found: StopIdx,
    },

    /// A leg departs before the traveller can be at its start
    #[error("leg {index} departs at {departure} before {ready} when the traveller is ready")]
    DepartsTooEarly {
        index: usize,
        departure: TransitTime,
        ready: TransitTime,
    },

    /// A ride arrives no later than it departs
    #[error("leg {index} does not move forward in time")]
    NonPositiveRide { index: usize },

    /// A walk has a negative duration
    #[error("leg {index} has a negative walking duration")]
    NegativeWalk { index: usize },

    /// The last leg arrives after the deadline
    #[error("journey arrives at {arrival}, after the deadline {deadline}")]
    MissesDeadline {
        arrival: TransitTime,
        deadline: TransitTime,
    },

    /// The legs do not end at the destination
    #[error("journey ends at stop {found} instead of stop {expected}")]
    WrongDestination { expected: StopIdx, found: StopIdx },
}
