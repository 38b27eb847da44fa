//! Journey types.
//!
//! A `Journey` is the answer to one arrive-by query: an ordered list of rides
//! and walks leading from the origin to the destination, readable forwards in
//! time.

use chrono::Duration;

use super::{JourneyError, StopIdx, TransitTime, TripIdx};

/// Travel aboard one trip, possibly spanning several consecutive connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    /// Trip ridden
    pub trip: TripIdx,
    /// Mode of transport of the trip
    pub mode: Option<String>,
    /// Boarding stop
    pub from: StopIdx,
    /// Alighting stop
    pub to: StopIdx,
    /// Departure from the boarding stop
    pub departure: TransitTime,
    /// Arrival at the alighting stop
    pub arrival: TransitTime,
    /// Position of the boarding stop within the trip
    pub board_position: usize,
    /// Position of the alighting stop within the trip
    pub alight_position: usize,
}

impl Ride {
    /// Returns the in-vehicle time.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Returns the number of connections this ride spans.
    pub fn hops(&self) -> usize {
        self.alight_position - self.board_position
    }
}

/// A walking transfer between two stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Origin stop
    pub from: StopIdx,
    /// Destination stop
    pub to: StopIdx,
    /// When the walk starts
    pub departure: TransitTime,
    /// Walking duration
    pub duration: Duration,
}

impl Walk {
    /// Creates a new walk.
    pub fn new(from: StopIdx, to: StopIdx, departure: TransitTime, duration: Duration) -> Self {
        Self {
            from,
            to,
            departure,
            duration,
        }
    }

    /// Returns when the walk ends.
    pub fn arrival(&self) -> TransitTime {
        self.departure + self.duration
    }
}

/// One leg of a journey: a ride or a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg {
    /// Aboard a trip
    Ride(Ride),
    /// On foot between stops
    Walk(Walk),
}

impl Leg {
    /// Returns the stop this leg starts at.
    pub fn from_stop(&self) -> StopIdx {
        match self {
            Leg::Ride(ride) => ride.from,
            Leg::Walk(walk) => walk.from,
        }
    }

    /// Returns the stop this leg ends at.
    pub fn to_stop(&self) -> StopIdx {
        match self {
            Leg::Ride(ride) => ride.to,
            Leg::Walk(walk) => walk.to,
        }
    }

    pub fn departure(&self) -> TransitTime {
        match self {
            Leg::Ride(ride) => ride.departure,
            Leg::Walk(walk) => walk.departure,
        }
    }

    pub fn arrival(&self) -> TransitTime {
        match self {
            Leg::Ride(ride) => ride.arrival,
            Leg::Walk(walk) => walk.arrival(),
        }
    }

    /// Returns the duration of this leg.
    pub fn duration(&self) -> Duration {
        match self {
            Leg::Ride(ride) => ride.duration(),
            Leg::Walk(walk) => walk.duration,
        }
    }

    /// Returns the trip ridden, if this is a ride.
    pub fn trip(&self) -> Option<TripIdx> {
        self.as_ride().map(|ride| ride.trip)
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, Leg::Ride(_))
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, Leg::Walk(_))
    }

    pub fn as_ride(&self) -> Option<&Ride> {
        match self {
            Leg::Ride(ride) => Some(ride),
            Leg::Walk(_) => None,
        }
    }

    pub fn as_walk(&self) -> Option<&Walk> {
        match self {
            Leg::Ride(_) => None,
            Leg::Walk(walk) => Some(walk),
        }
    }
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - The first leg starts at the origin, the last ends at the destination,
///   and each leg starts where the previous one ended
/// - No leg departs before the previous leg arrives
/// - The final arrival is no later than the deadline
/// - A journey with no legs has `origin == destination` and departs and
///   arrives at the deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    origin: StopIdx,
    destination: StopIdx,
    deadline: TransitTime,
    legs: Vec<Leg>,
}

impl Journey {
    /// Constructs a journey, validating connectivity and timing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the legs don't chain from `origin` to `destination`,
    /// a leg departs before the previous one arrives, a ride doesn't move
    /// forward in time, a walk is negative, or the deadline is missed.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::{Journey, Leg, Ride, StopIdx, TransitTime, TripIdx};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let ride = Ride {
    ///     trip: TripIdx(0),
    ///     mode: Some("bus".to_string()),
    ///     from: StopIdx(0),
    ///     to: StopIdx(1),
    ///     departure: TransitTime::parse("08:00", date).unwrap(),
    ///     arrival: TransitTime::parse("08:30", date).unwrap(),
    ///     board_position: 0,
    ///     alight_position: 1,
    /// };
    ///
    /// let deadline = TransitTime::parse("09:00", date).unwrap();
    /// let journey = Journey::new(StopIdx(0), StopIdx(1), deadline, vec![Leg::Ride(ride)]).unwrap();
    ///
    /// assert_eq!(journey.ride_count(), 1);
    /// assert_eq!(journey.departure_time().to_string(), "08:00");
    /// ```
    pub fn new(
        origin: StopIdx,
        destination: StopIdx,
        deadline: TransitTime,
        legs: Vec<Leg>,
    ) -> Result<Self, JourneyError> {
        let mut at = origin;
        let mut ready: Option<TransitTime> = None;

        for (index, leg) in legs.iter().enumerate() {
            if leg.from_stop() != at {
                return Err(JourneyError::Disconnected {
                    index,
                    expected: at,
                    found: leg.from_stop(),
                });
            }

            match leg {
                Leg::Ride(ride) if ride.arrival <= ride.departure => {
                    return Err(JourneyError::NonPositiveRide { index });
                }
                Leg::Walk(walk) if walk.duration < Duration::zero() => {
                    return Err(JourneyError::NegativeWalk { index });
                }
                _ => {}
            }

            if let Some(ready) = ready {
                if leg.departure() < ready {
                    return Err(JourneyError::DepartsTooEarly {
                        index,
                        departure: leg.departure(),
                        ready,
                    });
                }
            }

            at = leg.to_stop();
            ready = Some(leg.arrival());
        }

        if at != destination {
            return Err(JourneyError::WrongDestination {
                expected: destination,
                found: at,
            });
        }

        if let Some(arrival) = ready {
            if arrival > deadline {
                return Err(JourneyError::MissesDeadline { arrival, deadline });
            }
        }

        Ok(Journey {
            origin,
            destination,
            deadline,
            legs,
        })
    }

    /// The zero-leg journey for a query whose origin is its destination.
    pub fn stay(stop: StopIdx, deadline: TransitTime) -> Self {
        Journey {
            origin: stop,
            destination: stop,
            deadline,
            legs: Vec::new(),
        }
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn origin(&self) -> StopIdx {
        self.origin
    }

    pub fn destination(&self) -> StopIdx {
        self.destination
    }

    /// Returns the arrival deadline the journey was planned against.
    pub fn deadline(&self) -> TransitTime {
        self.deadline
    }

    /// Returns when the traveller leaves the origin.
    pub fn departure_time(&self) -> TransitTime {
        self.legs
            .first()
            .map(Leg::departure)
            .unwrap_or(self.deadline)
    }

    /// Returns when the traveller reaches the destination.
    pub fn arrival_time(&self) -> TransitTime {
        self.legs.last().map(Leg::arrival).unwrap_or(self.deadline)
    }

    /// Returns the total journey duration.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Returns the total walking time.
    pub fn total_walk_duration(&self) -> Duration {
        self.walks().map(|w| w.duration).sum()
    }

    /// Returns all rides in order.
    pub fn rides(&self) -> impl Iterator<Item = &Ride> {
        self.legs.iter().filter_map(Leg::as_ride)
    }

    /// Returns all walks in order.
    pub fn walks(&self) -> impl Iterator<Item = &Walk> {
        self.legs.iter().filter_map(Leg::as_walk)
    }

    pub fn ride_count(&self) -> usize {
        self.rides().count()
    }

    /// Returns the number of changes between vehicles.
    pub fn transfer_count(&self) -> usize {
        self.ride_count().saturating_sub(1)
    }

    /// Returns true when origin and destination coincide and nothing is travelled.
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }
}
