//! Core data model (spec §3): stops, patterns, trip schedules, transfers,
//! access/egress legs, and the stop-arrival record produced by the search.

use std::fmt;

/// Seconds since midnight (or since an arbitrary shared epoch). Signed so
/// reverse search, which subtracts durations, never needs to saturate.
pub type Timestamp = i64;

/// Monetary or abstract multi-criteria cost. Not used on the timing hot
/// path, so a float is fine here even though times stay integer seconds.
pub type Cost = f64;

pub type StopIndex = u32;
pub type PatternIndex = u32;
/// Position of a trip within a pattern's trip list (ordered by departure at stop 0).
pub type TripIndex = u32;

/// A transit stop. Integer index `0..num_stops`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub wheelchair_accessible: bool,
}

/// Identifies one scheduled trip globally: which pattern, and which position
/// within that pattern's (departure-ordered) trip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalTripRef {
    pub pattern: PatternIndex,
    pub trip: TripIndex,
}

/// An ordered sequence of stops shared by a group of trips.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub stops: Vec<StopIndex>,
}

impl Pattern {
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }
}

/// One trip's timetable along its pattern: `arrival[i]`/`departure[i]` at
/// `pattern.stops[i]`. Trips within a pattern must not overtake each other
/// (enforced at `InMemoryProvider` construction, see `provider.rs`).
#[derive(Debug, Clone)]
pub struct TripSchedule {
    pub arrival: Vec<Timestamp>,
    pub departure: Vec<Timestamp>,
}

impl TripSchedule {
    pub fn num_stops(&self) -> usize {
        self.arrival.len()
    }
}

/// A footpath between two stops, independent of any trip.
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    pub from_stop: StopIndex,
    pub to_stop: StopIndex,
    pub duration_seconds: i64,
    pub cost: Cost,
}

/// Non-transit leg attaching the street network to a stop (access) or a stop
/// to the destination (egress).
#[derive(Debug, Clone, Copy)]
pub struct Leg {
    pub stop: StopIndex,
    pub duration_seconds: i64,
    pub cost: Cost,
}

/// Opaque fare-transfer-allowance tag (spec §4.8). Two tags are equal iff
/// both the value and the expiry bucket match; otherwise arrivals carrying
/// different tags are incomparable on that coordinate during dominance
/// checks. The state store never interprets the value itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareTag {
    pub value: u32,
    pub expires_at: Timestamp,
}

/// The typed predecessor of a `StopArrival`. Forms a reverse DAG: many
/// arrivals may share a predecessor, but each arrival points to exactly one.
#[derive(Debug, Clone, Copy)]
pub enum Predecessor {
    /// Terminal: this arrival was seeded at round 0 by the search's
    /// fixed-constraint leg — the access leg for a forward (depart-at)
    /// search, the egress leg for a reverse (arrive-by) search, since
    /// reverse search runs the whole scan backward from the arrival
    /// deadline. `path::reconstruct` is what tells the two apart.
    Access { duration_seconds: i64 },
    Transit {
        board_stop: StopIndex,
        /// The trip's own departure time at `board_stop` (may be later than
        /// `board_arrival_time + boardSlack` — the trip search only
        /// guarantees the earliest trip clearing that threshold).
        board_time: Timestamp,
        /// The antecedent arrival's `arrival_time` at `board_stop`, used to
        /// locate that exact arrival when walking the predecessor chain.
        board_arrival_time: Timestamp,
        trip: GlobalTripRef,
    },
    Transfer {
        from_stop: StopIndex,
        duration_seconds: i64,
    },
}

impl Predecessor {
    pub fn is_access(&self) -> bool {
        matches!(self, Predecessor::Access { .. })
    }
}

/// The central search record (spec §3 "Stop Arrival"). Invariant:
/// `arrival_time == departure_time + leg_duration` for whichever leg
/// `predecessor` describes.
#[derive(Debug, Clone)]
pub struct StopArrival {
    pub stop: StopIndex,
    pub round: u32,
    pub arrival_time: Timestamp,
    pub departure_time: Timestamp,
    pub travel_duration: i64,
    pub cost: Cost,
    pub predecessor: Predecessor,
    pub fare_tag: Option<FareTag>,
}

impl fmt::Display for StopArrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stop {} round {} arrival {} cost {:.2}",
            self.stop, self.round, self.arrival_time, self.cost
        )
    }
}
