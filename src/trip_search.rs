//! Trip Schedule Search (TSS, spec §4.2): given a pattern, a stop position,
//! and a time bound, finds the earliest boardable trip (forward) or the
//! latest alightable trip (reverse). Trips within a pattern are ordered by
//! departure at stop 0 and never overtake each other (spec §3), so the
//! search can binary-search on larger patterns and fall back to a linear
//! scan on small ones.
//!
//! Boarding/alighting uses a non-strict bound (`>=`/`<=`): the worked
//! examples in spec §8 scenario C only work out if a trip departing exactly
//! at the earliest boardable time is itself boardable. Strict improvement
//! is instead enforced where it matters — accepting a candidate into a
//! state store (spec §4.4's "strictly improves bestOverall").

use crate::model::{GlobalTripRef, PatternIndex, Timestamp, TripIndex};
use crate::provider::TransitDataProvider;

/// Above this many trips in a pattern, binary search; at or below, scan
/// linearly. Matches the ~50-trip threshold spec §4.2 calls out.
pub const TRIP_BINARY_THRESHOLD: usize = 50;

/// Skips trips the caller has flagged out of service for this request
/// (calendar exceptions, peak/off-peak pattern splits the caller already
/// performed before the TDP was built, etc).
pub type InServicePredicate<'a> = dyn Fn(GlobalTripRef) -> bool + 'a;

/// Earliest trip departing `pattern`'s stop at `stop_position` no earlier
/// than `threshold`, restricted to trip indices below `upper_bound` (we
/// already boarded a later trip this round and only want to improve on it).
pub fn find_boardable_trip(
    provider: &dyn TransitDataProvider,
    pattern: PatternIndex,
    stop_position: usize,
    threshold: Timestamp,
    upper_bound: Option<TripIndex>,
    in_service: &InServicePredicate<'_>,
) -> Option<(TripIndex, Timestamp)> {
    let num_trips = provider.num_trips(pattern);
    let bound = upper_bound.map(|b| b as usize).unwrap_or(num_trips).min(num_trips);
    if bound == 0 {
        return None;
    }

    let departure_at = |trip: usize| -> Timestamp {
        provider.trip_schedule(pattern, trip as TripIndex).departure[stop_position]
    };

    if bound <= TRIP_BINARY_THRESHOLD {
        let mut found = None;
        for trip_idx in (0..bound).rev() {
            let departure = departure_at(trip_idx);
            if departure < threshold {
                break;
            }
            if in_service(GlobalTripRef {
                pattern,
                trip: trip_idx as TripIndex,
            }) {
                found = Some((trip_idx as TripIndex, departure));
            }
        }
        return found;
    }

    // Binary search for the leftmost (earliest) trip whose departure clears
    // the threshold, ignoring service status.
    let mut lo = 0usize;
    let mut hi = bound;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if departure_at(mid) >= threshold {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    if lo >= bound {
        return None;
    }

    // Ties at the same departure time: prefer the earliest index among them.
    let mut idx = lo;
    while idx > 0 && departure_at(idx - 1) == departure_at(idx) {
        idx -= 1;
    }

    // Sweep forward from the hint toward the bound for the first in-service trip.
    while idx < bound {
        let departure = departure_at(idx);
        if departure < threshold {
            idx += 1;
            continue;
        }
        if in_service(GlobalTripRef {
            pattern,
            trip: idx as TripIndex,
        }) {
            return Some((idx as TripIndex, departure));
        }
        idx += 1;
    }
    None
}

/// Symmetric to `find_boardable_trip`: latest trip arriving at `pattern`'s
/// stop at `stop_position` no later than `threshold`, restricted to trip
/// indices above `lower_bound`.
pub fn find_alightable_trip(
    provider: &dyn TransitDataProvider,
    pattern: PatternIndex,
    stop_position: usize,
    threshold: Timestamp,
    lower_bound: Option<TripIndex>,
    in_service: &InServicePredicate<'_>,
) -> Option<(TripIndex, Timestamp)> {
    let num_trips = provider.num_trips(pattern);
    if num_trips == 0 {
        return None;
    }
    let low = lower_bound.map(|b| b as usize + 1).unwrap_or(0);
    if low >= num_trips {
        return None;
    }

    let arrival_at = |trip: usize| -> Timestamp {
        provider.trip_schedule(pattern, trip as TripIndex).arrival[stop_position]
    };

    if num_trips - low <= TRIP_BINARY_THRESHOLD {
        let mut found = None;
        for trip_idx in low..num_trips {
            let arrival = arrival_at(trip_idx);
            if arrival > threshold {
                break;
            }
            if in_service(GlobalTripRef {
                pattern,
                trip: trip_idx as TripIndex,
            }) {
                found = Some((trip_idx as TripIndex, arrival));
            }
        }
        return found;
    }

    // Binary search for the rightmost trip whose arrival clears the threshold.
    let mut lo = low;
    let mut hi = num_trips;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if arrival_at(mid) <= threshold {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == low {
        return None;
    }
    let mut idx = lo - 1;

    while idx > low && arrival_at(idx - 1) == arrival_at(idx) {
        idx -= 1;
    }

    loop {
        let arrival = arrival_at(idx);
        if arrival > threshold {
            return None;
        }
        if in_service(GlobalTripRef {
            pattern,
            trip: idx as TripIndex,
        }) {
            return Some((idx as TripIndex, arrival));
        }
        if idx == low {
            return None;
        }
        idx -= 1;
    }
}
