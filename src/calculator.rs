//! Transit Calculator (TC, spec §4.1): direction-polymorphic arithmetic so
//! the range-RAPTOR worker is written once and runs correctly in both
//! directions without branching on `Direction` anywhere in its hot loops.

use crate::model::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// One implementation per direction; callers never match on `Direction`
/// themselves, they just call through this trait.
pub trait TransitCalculator: Send + Sync {
    fn direction(&self) -> Direction;

    fn add(&self, t: Timestamp, delta: i64) -> Timestamp;
    fn sub(&self, t: Timestamp, delta: i64) -> Timestamp;

    /// `true` iff `a` is a strictly better arrival/departure bound than `b`.
    fn is_better(&self, a: Timestamp, b: Timestamp) -> bool;

    /// The value that means "not yet reached" — `+inf` forward, `-inf` reverse.
    fn unreached(&self) -> Timestamp;

    /// Slack is paid at boarding (forward) or at alighting (reverse).
    fn earliest_board_time(&self, t: Timestamp, board_slack: i64) -> Timestamp;

    /// The departure minutes range-RAPTOR iterates over, in the traversal
    /// order that lets later iterations reuse work from earlier ones:
    /// downward from the end of the window forward, upward from the start
    /// reverse.
    fn iteration_departures(
        &self,
        earliest_departure: Timestamp,
        window_seconds: i64,
        step_seconds: i64,
    ) -> Vec<Timestamp>;

    /// The wall-clock departure time of a journey whose first transit
    /// boarding is at `first_board_time`, reached via an access leg of
    /// `access_duration` seconds.
    fn origin_departure_time(
        &self,
        first_board_time: Timestamp,
        access_duration: i64,
        board_slack: i64,
    ) -> Timestamp;

    /// Index order to walk a pattern's stops in: ascending forward
    /// (boarding happens before alighting), descending reverse.
    fn stop_order(&self, num_stops: usize) -> Vec<usize>;

    /// Maps a timestamp into a space where smaller always means better,
    /// regardless of direction — used by the pareto-set variants so their
    /// dominance relation never has to branch on direction either.
    fn rank(&self, t: Timestamp) -> Timestamp {
        match self.direction() {
            Direction::Forward => t,
            Direction::Reverse => t.checked_neg().unwrap_or(Timestamp::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardCalculator;

impl TransitCalculator for ForwardCalculator {
    fn direction(&self) -> Direction {
        Direction::Forward
    }

    fn add(&self, t: Timestamp, delta: i64) -> Timestamp {
        t + delta
    }

    fn sub(&self, t: Timestamp, delta: i64) -> Timestamp {
        t - delta
    }

    fn is_better(&self, a: Timestamp, b: Timestamp) -> bool {
        a < b
    }

    fn unreached(&self) -> Timestamp {
        Timestamp::MAX
    }

    fn earliest_board_time(&self, t: Timestamp, board_slack: i64) -> Timestamp {
        t + board_slack
    }

    fn iteration_departures(
        &self,
        earliest_departure: Timestamp,
        window_seconds: i64,
        step_seconds: i64,
    ) -> Vec<Timestamp> {
        let mut departures = Vec::new();
        let mut t = earliest_departure + window_seconds;
        while t >= earliest_departure {
            departures.push(t);
            t -= step_seconds;
        }
        departures
    }

    fn origin_departure_time(
        &self,
        first_board_time: Timestamp,
        access_duration: i64,
        board_slack: i64,
    ) -> Timestamp {
        first_board_time - (board_slack + access_duration)
    }

    fn stop_order(&self, num_stops: usize) -> Vec<usize> {
        (0..num_stops).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseCalculator;

impl TransitCalculator for ReverseCalculator {
    fn direction(&self) -> Direction {
        Direction::Reverse
    }

    fn add(&self, t: Timestamp, delta: i64) -> Timestamp {
        t - delta
    }

    fn sub(&self, t: Timestamp, delta: i64) -> Timestamp {
        t + delta
    }

    fn is_better(&self, a: Timestamp, b: Timestamp) -> bool {
        a > b
    }

    fn unreached(&self) -> Timestamp {
        Timestamp::MIN
    }

    fn earliest_board_time(&self, t: Timestamp, _board_slack: i64) -> Timestamp {
        // Slack is paid at alight time in reverse search.
        t
    }

    fn iteration_departures(
        &self,
        earliest_departure: Timestamp,
        window_seconds: i64,
        step_seconds: i64,
    ) -> Vec<Timestamp> {
        let mut departures = Vec::new();
        let mut t = earliest_departure;
        let end = earliest_departure + window_seconds;
        while t <= end {
            departures.push(t);
            t += step_seconds;
        }
        departures
    }

    fn origin_departure_time(
        &self,
        first_board_time: Timestamp,
        access_duration: i64,
        _board_slack: i64,
    ) -> Timestamp {
        // `first_board_time` is the first transit boarding's real wall-clock
        // time regardless of which direction found it; the access leg always
        // precedes it chronologically, so the origin departure is always
        // earlier by `access_duration` seconds. No slack term here: slack is
        // paid at alighting in reverse search, not at this connection.
        first_board_time - access_duration
    }

    fn stop_order(&self, num_stops: usize) -> Vec<usize> {
        (0..num_stops).rev().collect()
    }
}
