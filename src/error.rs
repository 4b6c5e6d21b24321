//! Error taxonomy (spec §7). Input-invariant violations are rejected before
//! any search work; search-internal inconsistencies are bugs that abort the
//! request with a diagnostic. Resource exhaustion and "no path found" are
//! not represented as errors at all — they show up as a partial or empty
//! `Response` (see `response.rs`).

use crate::model::{PatternIndex, StopIndex, TripIndex};

/// Rejected at the request-validation boundary, before any search work runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("access leg references stop {stop} but the network has only {num_stops} stops")]
    AccessStopOutOfRange { stop: StopIndex, num_stops: usize },
    #[error("egress leg references stop {stop} but the network has only {num_stops} stops")]
    EgressStopOutOfRange { stop: StopIndex, num_stops: usize },
    #[error("search window must be non-negative, got {0}")]
    NegativeWindow(i64),
    #[error("iteration step must be positive, got {0}")]
    NonPositiveStep(i64),
}

/// Raised while building a `TransitDataProvider`: the input itself violates
/// an invariant the search relies on (spec §5 "Failure isolation").
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error(
        "pattern {pattern} is not monotone: trip {later_trip} departs stop 0 after trip {earlier_trip} but arrives earlier at stop {stop}"
    )]
    NonMonotonePattern {
        pattern: PatternIndex,
        earlier_trip: TripIndex,
        later_trip: TripIndex,
        stop: StopIndex,
    },
    #[error("pattern {pattern} has a trip schedule with {got} stops, expected {expected}")]
    TripScheduleLengthMismatch {
        pattern: PatternIndex,
        expected: usize,
        got: usize,
    },
}

/// A bug: the search's own invariants (acyclic predecessor chain, trip
/// indices within range) were violated at runtime. Never silently
/// recovered from — surfaced with enough context to debug.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchFault {
    #[error("predecessor chain broken at stop {stop} in round {round}")]
    BrokenPredecessorChain { stop: StopIndex, round: u32 },
    #[error("predecessor chain exceeded {max_legs} legs without reaching an access arrival")]
    InfiniteLoop { max_legs: usize },
    #[error("trip {trip} out of range for pattern {pattern} ({num_trips} trips)")]
    TripIndexOutOfRange {
        pattern: PatternIndex,
        trip: TripIndex,
        num_trips: usize,
    },
}

/// Category surfaced to callers alongside a human-readable reason (spec §7
/// "User-visible behavior").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    InternalError,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(transparent)]
    InvalidInput(#[from] RequestError),
    #[error(transparent)]
    InvalidProvider(#[from] ProviderError),
    #[error(transparent)]
    Internal(#[from] SearchFault),
}

impl CoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::InvalidInput(_) | CoreError::InvalidProvider(_) => {
                ErrorCategory::InvalidInput
            }
            CoreError::Internal(_) => ErrorCategory::InternalError,
        }
    }
}
