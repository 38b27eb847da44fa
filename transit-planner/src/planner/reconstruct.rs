//! Turning scan tables into a journey.
//!
//! Follows parent links forward from the origin. A boarding parent becomes one
//! ride leg spanning from the boarded connection to the trip's exit, so
//! consecutive connections of a trip are never split. A walking parent becomes
//! a walk leg timed to end exactly when the next ride leaves, or exactly at the
//! deadline when it ends at the destination.

use tracing::error;

use crate::domain::{Journey, JourneyError, Leg, Ride, StopIdx, Walk};
use crate::timetable::TimetableIndex;

use super::scan::{Parent, ScanState};

/// The scan reached the origin but its tables don't describe a valid journey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoPathError {
    /// No departure from the origin was recorded
    #[error("origin stop {0} was not reached by the scan")]
    OriginUnreachable(StopIdx),

    /// A link points at a trip or time the scan never recorded
    #[error("parent chain broken at stop {0}")]
    BrokenChain(StopIdx),

    /// Following links never reached the destination
    #[error("parent chain does not terminate")]
    Unterminated,

    /// The assembled legs fail journey validation
    #[error("reconstructed journey is inconsistent: {0}")]
    Inconsistent(#[from] JourneyError),
}

/// Rebuild the journey from `origin` out of a completed scan.
///
/// # Errors
///
/// Any error here means the scan tables are inconsistent; a correct scan whose
/// origin is reachable always reconstructs.
pub fn reconstruct(
    index: &TimetableIndex,
    state: &ScanState,
    origin: StopIdx,
) -> Result<Journey, NoPathError> {
    let result = follow_links(index, state, origin);

    if let Err(e) = &result {
        error!(
            origin = %index.stop(origin).id,
            destination = %index.stop(state.destination()).id,
            deadline = %state.deadline(),
            error = %e,
            "journey reconstruction failed"
        );
    }

    result
}

fn follow_links(
    index: &TimetableIndex,
    state: &ScanState,
    origin: StopIdx,
) -> Result<Journey, NoPathError> {
    if state.best(origin).is_none() {
        return Err(NoPathError::OriginUnreachable(origin));
    }

    let destination = state.destination();
    let deadline = state.deadline();
    let limit = index.trip_count() + index.stop_count() + 1;

    let mut legs = Vec::new();
    let mut at = origin;
    let mut link = state.parent(origin);

    loop {
        if legs.len() > limit {
            return Err(NoPathError::Unterminated);
        }

        match link {
            Parent::None if at == destination => break,
            Parent::None => return Err(NoPathError::BrokenChain(at)),

            Parent::Board(board) => {
                let boarded = index.connection(board);
                let exit = state
                    .trip_exit(boarded.trip)
                    .ok_or(NoPathError::BrokenChain(at))?;
                let alighted = index.connection(exit.connection);

                legs.push(Leg::Ride(Ride {
                    trip: boarded.trip,
                    mode: index.trip(boarded.trip).mode.clone(),
                    from: boarded.from,
                    to: alighted.to,
                    departure: boarded.departure,
                    arrival: alighted.arrival,
                    board_position: boarded.position,
                    alight_position: alighted.position + 1,
                }));

                at = alighted.to;
                link = exit.next;
            }

            Parent::Walk { footpath, board } => {
                let footpath = index.footpath(footpath);
                let leave_by = match board {
                    Some(c) => index.connection(c).departure,
                    None => deadline,
                };
                let departure = leave_by
                    .checked_sub(footpath.duration)
                    .ok_or(NoPathError::BrokenChain(at))?;

                legs.push(Leg::Walk(Walk::new(
                    footpath.from,
                    footpath.to,
                    departure,
                    footpath.duration,
                )));

                at = footpath.to;
                link = match board {
                    Some(c) => Parent::Board(c),
                    None => Parent::None,
                };
            }
        }
    }

    Ok(Journey::new(origin, destination, deadline, legs)?)
}
