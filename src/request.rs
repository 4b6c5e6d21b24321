//! Request contract (spec §3 "Request", §6). `Request` is the entire
//! configuration surface the core exposes — there is no external config
//! file layer, since the core has no persistence of its own.

pub use crate::calculator::Direction;
use crate::error::RequestError;
use crate::fare::{FareTransferObserver, NoFareObserver};
use crate::model::{Leg, StopIndex, Timestamp};
use crate::service::{AlwaysInService, ServiceFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    BestTimes,
    MultiCriteria,
}

/// Which stops/rounds/patterns to record traces for, if any (spec §6
/// "optional debugFilter"). Left unset by default; a caller opts in when
/// chasing down a specific result.
#[derive(Debug, Clone, Default)]
pub struct DebugFilter {
    pub stops: Vec<StopIndex>,
    pub rounds: Vec<u32>,
    pub patterns: Vec<u32>,
}

pub struct Request {
    pub earliest_departure_time: Timestamp,
    pub search_window_seconds: i64,
    pub iteration_step_seconds: i64,
    pub board_slack_seconds: i64,
    pub max_transfers: u32,
    pub access_legs: Vec<Leg>,
    pub egress_legs: Vec<Leg>,
    pub direction: Direction,
    pub profile: Profile,
    pub fare_observer: Option<Box<dyn FareTransferObserver>>,
    pub service_filter: Box<dyn ServiceFilter>,
    pub debug_filter: Option<DebugFilter>,
    /// Disables the dominance short-circuit that a negative fare-transfer
    /// allowance would otherwise defeat (spec §9 Open Questions). The core
    /// exposes the flag without embedding the fare logic that produces such
    /// allowances.
    pub allow_negative_transfer_allowance: bool,
    /// Relaxed-cost-dominance epsilon at the destination (spec §4.6). `0.0`
    /// for exact pareto optimality; small positive values retain
    /// near-optimal alternatives that differ on other coordinates.
    pub cost_relaxation_epsilon: f64,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Validates the invariants spec §7 requires be checked before any
    /// search work runs.
    pub fn validate(&self, num_stops: usize) -> Result<(), RequestError> {
        if self.search_window_seconds < 0 {
            return Err(RequestError::NegativeWindow(self.search_window_seconds));
        }
        if self.iteration_step_seconds <= 0 {
            return Err(RequestError::NonPositiveStep(self.iteration_step_seconds));
        }
        for leg in &self.access_legs {
            if leg.stop as usize >= num_stops {
                return Err(RequestError::AccessStopOutOfRange {
                    stop: leg.stop,
                    num_stops,
                });
            }
        }
        for leg in &self.egress_legs {
            if leg.stop as usize >= num_stops {
                return Err(RequestError::EgressStopOutOfRange {
                    stop: leg.stop,
                    num_stops,
                });
            }
        }
        Ok(())
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_transfers + 1
    }
}

pub struct RequestBuilder {
    earliest_departure_time: Timestamp,
    search_window_seconds: i64,
    iteration_step_seconds: i64,
    board_slack_seconds: i64,
    max_transfers: u32,
    access_legs: Vec<Leg>,
    egress_legs: Vec<Leg>,
    direction: Direction,
    profile: Profile,
    fare_observer: Option<Box<dyn FareTransferObserver>>,
    service_filter: Box<dyn ServiceFilter>,
    debug_filter: Option<DebugFilter>,
    allow_negative_transfer_allowance: bool,
    cost_relaxation_epsilon: f64,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            earliest_departure_time: 0,
            search_window_seconds: 0,
            iteration_step_seconds: 60,
            board_slack_seconds: 0,
            max_transfers: 3,
            access_legs: Vec::new(),
            egress_legs: Vec::new(),
            direction: Direction::Forward,
            profile: Profile::BestTimes,
            fare_observer: None,
            service_filter: Box::new(AlwaysInService),
            debug_filter: None,
            allow_negative_transfer_allowance: false,
            cost_relaxation_epsilon: 0.0,
        }
    }
}

impl RequestBuilder {
    pub fn departure_at(mut self, time: Timestamp) -> Self {
        self.earliest_departure_time = time;
        self
    }

    pub fn window(mut self, seconds: i64) -> Self {
        self.search_window_seconds = seconds;
        self
    }

    pub fn iteration_step(mut self, seconds: i64) -> Self {
        self.iteration_step_seconds = seconds;
        self
    }

    pub fn board_slack(mut self, seconds: i64) -> Self {
        self.board_slack_seconds = seconds;
        self
    }

    pub fn max_transfers(mut self, transfers: u32) -> Self {
        self.max_transfers = transfers;
        self
    }

    pub fn access(mut self, leg: Leg) -> Self {
        self.access_legs.push(leg);
        self
    }

    pub fn egress(mut self, leg: Leg) -> Self {
        self.egress_legs.push(leg);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn fare_observer(mut self, observer: Box<dyn FareTransferObserver>) -> Self {
        self.fare_observer = Some(observer);
        self
    }

    pub fn service_filter(mut self, filter: Box<dyn ServiceFilter>) -> Self {
        self.service_filter = filter;
        self
    }

    pub fn debug_filter(mut self, filter: DebugFilter) -> Self {
        self.debug_filter = Some(filter);
        self
    }

    pub fn allow_negative_transfer_allowance(mut self, allow: bool) -> Self {
        self.allow_negative_transfer_allowance = allow;
        self
    }

    pub fn cost_relaxation_epsilon(mut self, epsilon: f64) -> Self {
        self.cost_relaxation_epsilon = epsilon;
        self
    }

    pub fn build(self) -> Request {
        Request {
            earliest_departure_time: self.earliest_departure_time,
            search_window_seconds: self.search_window_seconds,
            iteration_step_seconds: self.iteration_step_seconds,
            board_slack_seconds: self.board_slack_seconds,
            max_transfers: self.max_transfers,
            access_legs: self.access_legs,
            egress_legs: self.egress_legs,
            direction: self.direction,
            profile: self.profile,
            fare_observer: self.fare_observer,
            service_filter: self.service_filter,
            debug_filter: self.debug_filter,
            allow_negative_transfer_allowance: self.allow_negative_transfer_allowance,
            cost_relaxation_epsilon: self.cost_relaxation_epsilon,
        }
    }
}

/// Used internally wherever a fare observer is optional but a concrete
/// trait object is easier to thread through than `Option<&dyn _>`.
pub(crate) fn default_fare_observer() -> NoFareObserver {
    NoFareObserver
}
