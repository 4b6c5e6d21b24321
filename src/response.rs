//! Response contract (spec §6): a collection of `Path` values plus
//! diagnostic counters. Partial results are marked as such rather than
//! raised as errors (spec §7).

use crate::model::{Cost, GlobalTripRef, StopIndex, Timestamp};

#[derive(Debug, Clone)]
pub enum PathLeg {
    Access {
        stop: StopIndex,
        departure_time: Timestamp,
        arrival_time: Timestamp,
    },
    Transit {
        trip: GlobalTripRef,
        board_stop: StopIndex,
        board_time: Timestamp,
        alight_stop: StopIndex,
        alight_time: Timestamp,
    },
    Transfer {
        from_stop: StopIndex,
        to_stop: StopIndex,
        departure_time: Timestamp,
        arrival_time: Timestamp,
    },
    Egress {
        stop: StopIndex,
        departure_time: Timestamp,
        arrival_time: Timestamp,
    },
}

impl PathLeg {
    pub fn departure_time(&self) -> Timestamp {
        match *self {
            PathLeg::Access { departure_time, .. }
            | PathLeg::Transfer { departure_time, .. }
            | PathLeg::Egress { departure_time, .. } => departure_time,
            PathLeg::Transit { board_time, .. } => board_time,
        }
    }

    pub fn arrival_time(&self) -> Timestamp {
        match *self {
            PathLeg::Access { arrival_time, .. }
            | PathLeg::Transfer { arrival_time, .. }
            | PathLeg::Egress { arrival_time, .. } => arrival_time,
            PathLeg::Transit { alight_time, .. } => alight_time,
        }
    }
}

/// A fully reconstructed journey: access leg, boardings/rides/transfers, egress.
#[derive(Debug, Clone)]
pub struct Path {
    pub legs: Vec<PathLeg>,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    pub num_transfers: u32,
    pub travel_duration: i64,
    pub cost: Cost,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub iterations: u32,
    pub rounds: u32,
    pub patterns_scanned: u64,
    pub pareto_evictions: u64,
    pub max_pareto_set_size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Response {
    pub paths: Vec<Path>,
    /// Set when a cancellation/resource-exhaustion signal cut the search
    /// short (spec §7 kind 2); the accumulated paths are still returned.
    pub partial: bool,
    pub diagnostics: Diagnostics,
}
