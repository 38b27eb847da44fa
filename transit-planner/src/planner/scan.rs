//! Reversed connection scan.
//!
//! One pass over the connection array in descending departure order computes,
//! for every stop, the latest time one can leave it and still reach the
//! destination by the deadline. A trip becomes reachable the first time one of
//! its connections arrives in time; every earlier connection of that trip is
//! then usable without looking at its arrival stop again.
//!
//! Equal departures at a stop are resolved by the number of rides on the
//! continuation: fewer wins, and on a further tie the candidate seen first in
//! scan order is kept.

use chrono::Duration;
use tracing::debug;

use crate::domain::{ConnectionIdx, FootpathIdx, StopIdx, TransitTime, TripIdx};
use crate::timetable::TimetableIndex;

use super::config::PlannerConfig;

/// How a stop's latest departure is realised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// No link: the destination itself, or a stop that can't reach it.
    None,
    /// Board the connection's trip here and ride it to the trip's exit.
    Board(ConnectionIdx),
    /// Walk the footpath, then board `board` at its far end. `None` means the
    /// footpath ends at the destination.
    Walk {
        footpath: FootpathIdx,
        board: Option<ConnectionIdx>,
    },
}

/// Where a reachable trip is left, fixed when the trip is first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripExit {
    /// Last connection ridden.
    pub connection: ConnectionIdx,
    /// Continuation from the alighting stop, as it stood when the trip was
    /// reached. Later improvements at that stop never change it.
    pub next: Parent,
    /// Rides on the whole continuation, this trip included.
    pub rides: u32,
}

/// Counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub connections_scanned: usize,
    pub connections_usable: usize,
    pub footpath_relaxations: usize,
    pub stops_improved: usize,
}

/// Per-query scan tables, indexed by compact ids.
#[derive(Debug, Clone)]
pub struct ScanState {
    destination: StopIdx,
    deadline: TransitTime,
    /// Latest departure per stop; `None` is unreachable.
    best: Vec<Option<TransitTime>>,
    parent: Vec<Parent>,
    /// Rides on the continuation recorded in `parent`.
    rides: Vec<u32>,
    /// Set once per trip, never cleared.
    trips: Vec<Option<TripExit>>,
    stats: ScanStats,
}

impl ScanState {
    fn new(index: &TimetableIndex, destination: StopIdx, deadline: TransitTime) -> Self {
        let mut best = vec![None; index.stop_count()];
        best[destination.0] = Some(deadline);

        Self {
            destination,
            deadline,
            best,
            parent: vec![Parent::None; index.stop_count()],
            rides: vec![0; index.stop_count()],
            trips: vec![None; index.trip_count()],
            stats: ScanStats::default(),
        }
    }

    pub fn destination(&self) -> StopIdx {
        self.destination
    }

    pub fn deadline(&self) -> TransitTime {
        self.deadline
    }

    /// Latest time one may leave `stop` and still arrive by the deadline.
    pub fn best(&self, stop: StopIdx) -> Option<TransitTime> {
        self.best[stop.0]
    }

    pub fn parent(&self, stop: StopIdx) -> Parent {
        self.parent[stop.0]
    }

    /// Rides needed from `stop` along its recorded continuation.
    pub fn rides_from(&self, stop: StopIdx) -> u32 {
        self.rides[stop.0]
    }

    pub fn is_reached(&self, trip: TripIdx) -> bool {
        self.trips[trip.0].is_some()
    }

    pub fn trip_exit(&self, trip: TripIdx) -> Option<&TripExit> {
        self.trips[trip.0].as_ref()
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Offer a departure from `stop`; returns true if it became the best.
    fn offer(&mut self, stop: StopIdx, time: TransitTime, parent: Parent, rides: u32) -> bool {
        let improves = match self.best[stop.0] {
            None => true,
            Some(current) => time > current || (time == current && rides < self.rides[stop.0]),
        };

        if improves {
            self.best[stop.0] = Some(time);
            self.parent[stop.0] = parent;
            self.rides[stop.0] = rides;
            self.stats.stops_improved += 1;
        }

        improves
    }

    /// Offer every stop that walks into `stop` the departure `time` there,
    /// continued by `board` and taking `rides` rides.
    fn relax_footpaths(
        &mut self,
        index: &TimetableIndex,
        stop: StopIdx,
        time: TransitTime,
        board: Option<ConnectionIdx>,
        rides: u32,
        max_walk: Duration,
    ) {
        for (footpath_idx, footpath) in index.footpaths_into(stop) {
            if footpath.duration > max_walk {
                continue;
            }
            let Some(candidate) = time.checked_sub(footpath.duration) else {
                continue;
            };

            self.stats.footpath_relaxations += 1;
            self.offer(
                footpath.from,
                candidate,
                Parent::Walk {
                    footpath: footpath_idx,
                    board,
                },
                rides,
            );
        }
    }
}

/// Run the reversed scan towards `destination` with arrival deadline `deadline`.
pub fn scan(
    index: &TimetableIndex,
    config: &PlannerConfig,
    destination: StopIdx,
    deadline: TransitTime,
) -> ScanState {
    let mut state = ScanState::new(index, destination, deadline);
    let min_change = config.min_change();
    let max_walk = config.max_walk();

    state.relax_footpaths(index, destination, deadline, None, 0, max_walk);

    for (position, connection) in index.connections().iter().enumerate() {
        let connection_idx = ConnectionIdx(position);
        state.stats.connections_scanned += 1;

        let rides = match state.trips[connection.trip.0] {
            Some(exit) => exit.rides,
            None => {
                let Some(latest) = state.best[connection.to.0] else {
                    continue;
                };
                let change = if connection.to == destination {
                    Duration::zero()
                } else {
                    min_change
                };
                let in_time = connection
                    .arrival
                    .checked_add(change)
                    .is_some_and(|ready| ready <= latest);
                if !in_time {
                    continue;
                }

                let exit = TripExit {
                    connection: connection_idx,
                    next: state.parent[connection.to.0],
                    rides: state.rides[connection.to.0] + 1,
                };
                state.trips[connection.trip.0] = Some(exit);
                exit.rides
            }
        };

        state.stats.connections_usable += 1;

        state.offer(
            connection.from,
            connection.departure,
            Parent::Board(connection_idx),
            rides,
        );

        // Relax even without an improvement: the later departure at `from`
        // may be a walk, which can't be extended by another walk.
        state.relax_footpaths(
            index,
            connection.from,
            connection.departure,
            Some(connection_idx),
            rides,
            max_walk,
        );
    }

    debug!(
        destination = %index.stop(destination).id,
        deadline = %deadline,
        scanned = state.stats.connections_scanned,
        usable = state.stats.connections_usable,
        footpath_relaxations = state.stats.footpath_relaxations,
        stops_improved = state.stats.stops_improved,
        "reverse scan complete"
    );

    state
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::planner::fixtures::date;
    use crate::timetable::{FootpathInput, StopInput, StopTimeInput, TripInput};
    use chrono::NaiveTime;
    use proptest::prelude::*;

    const STOPS: usize = 6;

    fn at(minutes: u32) -> TransitTime {
        TransitTime::new(
            date(),
            NaiveTime::from_hms_opt(6 + minutes / 60, minutes % 60, 0).unwrap(),
        )
    }

    /// Random trips as (start minute, [(stop, hop minutes, dwell minutes)]).
    fn arb_trips() -> impl Strategy<Value = Vec<(u32, Vec<(usize, u32, u32)>)>> {
        prop::collection::vec(
            (
                0u32..240,
                prop::collection::vec((0..STOPS, 1u32..30, 0u32..5), 2..5),
            ),
            1..10,
        )
    }

    fn arb_footpaths() -> impl Strategy<Value = Vec<(usize, usize, i64)>> {
        prop::collection::vec((0..STOPS, 0..STOPS, 0i64..15), 0..6)
    }

    fn build(
        trips: &[(u32, Vec<(usize, u32, u32)>)],
        footpaths: &[(usize, usize, i64)],
    ) -> TimetableIndex {
        let stops = (0..STOPS)
            .map(|i| StopInput::new(format!("S{i}"), format!("Stop {i}")))
            .collect();

        let trips = trips
            .iter()
            .enumerate()
            .map(|(id, (start, calls))| {
                let mut clock = *start;
                let stop_times = calls
                    .iter()
                    .enumerate()
                    .map(|(i, (stop, hop, dwell))| {
                        if i > 0 {
                            clock += hop;
                        }
                        let arrival = at(clock);
                        clock += dwell;
                        StopTimeInput::new(format!("S{stop}"), arrival, at(clock))
                    })
                    .collect();
                TripInput::new(format!("T{id}"), stop_times)
            })
            .collect();

        let footpaths = footpaths
            .iter()
            .map(|(from, to, mins)| FootpathInput {
                from: format!("S{from}"),
                to: format!("S{to}"),
                duration: Duration::minutes(*mins),
            })
            .collect();

        TimetableIndex::build(stops, footpaths, trips).unwrap()
    }

    /// Latest departures by repeated relaxation until nothing changes. Walks
    /// are only taken straight into the destination or straight onto a ride,
    /// as in the scan.
    fn fixed_point(
        index: &TimetableIndex,
        destination: StopIdx,
        deadline: TransitTime,
    ) -> Vec<Option<TransitTime>> {
        let mut best = vec![None; index.stop_count()];
        best[destination.0] = Some(deadline);

        let raise = |best: &mut Vec<Option<TransitTime>>, stop: StopIdx, t: TransitTime| {
            if best[stop.0].is_none_or(|b| t > b) {
                best[stop.0] = Some(t);
                true
            } else {
                false
            }
        };

        for footpath in index.footpaths().iter().filter(|f| f.to == destination) {
            raise(&mut best, footpath.from, deadline - footpath.duration);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for c in index.connections() {
                if best[c.to.0].is_some_and(|b| c.arrival <= b) {
                    changed |= raise(&mut best, c.from, c.departure);
                    for footpath in index.footpaths().iter().filter(|f| f.to == c.from) {
                        changed |= raise(&mut best, footpath.from, c.departure - footpath.duration);
                    }
                }
            }
        }

        best
    }

    proptest! {
        /// Every connection arriving by its stop's final best is boarded in time
        #[test]
        fn usable_connections_bound_departure_stop(
            trips in arb_trips(),
            footpaths in arb_footpaths(),
            destination in 0..STOPS,
            deadline in 60u32..360,
        ) {
            let index = build(&trips, &footpaths);
            let state = scan(&index, &PlannerConfig::default(), StopIdx(destination), at(deadline));

            for c in index.connections() {
                if state.best(c.to).is_some_and(|b| c.arrival <= b) {
                    prop_assert!(state.best(c.from).is_some_and(|b| b >= c.departure));
                }
            }
        }

        /// The single pass agrees with exhaustive relaxation
        #[test]
        fn scan_matches_fixed_point(
            trips in arb_trips(),
            footpaths in arb_footpaths(),
            destination in 0..STOPS,
            deadline in 60u32..360,
        ) {
            let index = build(&trips, &footpaths);
            let state = scan(&index, &PlannerConfig::default(), StopIdx(destination), at(deadline));
            let expected = fixed_point(&index, StopIdx(destination), at(deadline));

            for stop in 0..STOPS {
                prop_assert_eq!(state.best(StopIdx(stop)), expected[stop]);
            }
        }

        /// No stop can be left later than the deadline
        #[test]
        fn best_never_exceeds_deadline(
            trips in arb_trips(),
            footpaths in arb_footpaths(),
            destination in 0..STOPS,
            deadline in 60u32..360,
        ) {
            let index = build(&trips, &footpaths);
            let state = scan(&index, &PlannerConfig::default(), StopIdx(destination), at(deadline));

            for stop in 0..STOPS {
                prop_assert!(state.best(StopIdx(stop)).is_none_or(|b| b <= at(deadline)));
            }
            prop_assert_eq!(state.best(StopIdx(destination)), Some(at(deadline)));
        }
    }
}
