//! Range-RAPTOR Worker (RRW, spec §4.3): the per-request search loop. Split
//! into two engines sharing the same outer iteration/round structure —
//! `range_raptor` (Best-Times profile) and `mc_raptor` (multi-criteria
//! profile) — because what "improves" means at each stop differs enough
//! between the two that folding them into one generic loop would obscure
//! more than it shares.

pub mod mc_raptor;
pub mod range_raptor;

use std::collections::HashSet;

use crate::calculator::TransitCalculator;
use crate::error::CoreError;
use crate::hooks::SearchLifecycle;
use crate::model::{GlobalTripRef, Leg, PatternIndex, StopIndex, Timestamp, TripIndex};
use crate::provider::TransitDataProvider;
use crate::request::{Direction, Profile, Request};
use crate::response::Response;
use crate::service::ServiceFilter;
use crate::trip_search::{find_alightable_trip, find_boardable_trip};

use crate::calculator::{ForwardCalculator, ReverseCalculator};

/// Dispatches to the engine the request's `Profile` selects. The single
/// public entry point worker callers (and `batch::run_many`) use.
pub fn run(
    provider: &dyn TransitDataProvider,
    request: &Request,
    lifecycle: &dyn SearchLifecycle,
) -> Result<Response, CoreError> {
    request.validate(provider.num_stops())?;
    let calc: Box<dyn TransitCalculator> = match request.direction {
        Direction::Forward => Box::new(ForwardCalculator),
        Direction::Reverse => Box::new(ReverseCalculator),
    };
    match request.profile {
        Profile::BestTimes => range_raptor::run(provider, request, calc.as_ref(), lifecycle),
        Profile::MultiCriteria => mc_raptor::run(provider, request, calc.as_ref(), lifecycle),
    }
}

/// The legs a search seeds round 0 from: the request's fixed constraint.
/// Forward search departs at a known time, so it seeds from the access
/// legs; reverse (arrive-by) search has a fixed arrival deadline instead, so
/// it seeds from the egress legs and runs the whole scan backward from
/// there (spec §4.1).
pub(crate) fn seed_legs(request: &Request, direction: Direction) -> &[Leg] {
    match direction {
        Direction::Forward => &request.access_legs,
        Direction::Reverse => &request.egress_legs,
    }
}

/// The legs a search collects final results from — the mirror image of
/// `seed_legs`.
pub(crate) fn collect_legs(request: &Request, direction: Direction) -> &[Leg] {
    match direction {
        Direction::Forward => &request.egress_legs,
        Direction::Reverse => &request.access_legs,
    }
}

/// Every distinct pattern touching any of `marked_stops`.
pub(crate) fn candidate_patterns(
    provider: &dyn TransitDataProvider,
    marked_stops: &[StopIndex],
) -> Vec<PatternIndex> {
    let mut seen = HashSet::new();
    let mut patterns = Vec::new();
    for &stop in marked_stops {
        for stop_ref in provider.patterns_containing_stop(stop) {
            if seen.insert(stop_ref.pattern) {
                patterns.push(stop_ref.pattern);
            }
        }
    }
    patterns
}

/// Which leg of a hop a schedule lookup is for. Forward search boards
/// against a trip's departure array and alights against its arrival array;
/// reverse search reads the same two arrays with the roles swapped, since it
/// walks a pattern back to front (spec §4.1 direction polymorphism).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Board,
    Alight,
}

pub(crate) fn schedule_time_at(
    calc: &dyn TransitCalculator,
    provider: &dyn TransitDataProvider,
    pattern: PatternIndex,
    trip: TripIndex,
    position: usize,
    role: Role,
) -> Timestamp {
    let sched = provider.trip_schedule(pattern, trip);
    match (calc.direction(), role) {
        (Direction::Forward, Role::Board) => sched.departure[position],
        (Direction::Forward, Role::Alight) => sched.arrival[position],
        (Direction::Reverse, Role::Board) => sched.arrival[position],
        (Direction::Reverse, Role::Alight) => sched.departure[position],
    }
}

/// Finds the best boardable trip at `position` no worse than `threshold`,
/// restricted past `bound` (the already-boarded trip on this scan, if any).
/// Forward search wants the earliest trip clearing the threshold; reverse
/// search wants the latest (spec §4.2), but both read through the same
/// `Role::Board` array via `schedule_time_at`'s convention.
pub(crate) fn board_trip(
    calc: &dyn TransitCalculator,
    provider: &dyn TransitDataProvider,
    pattern: PatternIndex,
    position: usize,
    threshold: Timestamp,
    bound: Option<TripIndex>,
    in_service: &dyn ServiceFilter,
) -> Option<(TripIndex, Timestamp)> {
    let predicate = |trip: GlobalTripRef| in_service.in_service(trip);
    match calc.direction() {
        Direction::Forward => find_boardable_trip(provider, pattern, position, threshold, bound, &predicate),
        Direction::Reverse => find_alightable_trip(provider, pattern, position, threshold, bound, &predicate),
    }
}
