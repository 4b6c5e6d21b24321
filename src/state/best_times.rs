//! Best-Times state store (spec §4.4): one scalar arrival time per stop per
//! round, plus a running `bestOverall` used both to prune the transit scan
//! and as the strict-improvement gate for accepting a candidate at all.
//!
//! Reused across range-RAPTOR iterations (spec §5's arena allocation): call
//! `reset` between iterations instead of reallocating.

use crate::calculator::TransitCalculator;
use crate::model::{StopArrival, StopIndex, Timestamp};

pub struct BestTimesStore {
    num_stops: usize,
    max_rounds: usize,
    best_overall: Vec<Timestamp>,
    best_by_round: Vec<Vec<Timestamp>>,
    arrivals_by_round: Vec<Vec<Option<StopArrival>>>,
    touched: Vec<bool>,
    unreached: Timestamp,
}

impl BestTimesStore {
    pub fn new(calc: &dyn TransitCalculator, num_stops: usize, max_rounds: usize) -> Self {
        let unreached = calc.unreached();
        Self {
            num_stops,
            max_rounds,
            best_overall: vec![unreached; num_stops],
            best_by_round: vec![vec![unreached; num_stops]; max_rounds + 1],
            arrivals_by_round: (0..=max_rounds).map(|_| vec![None; num_stops]).collect(),
            touched: vec![false; num_stops],
            unreached,
        }
    }

    /// Clears all rounds back to "unreached" without shrinking the
    /// underlying allocations, so the same store can serve the next
    /// iteration departure.
    pub fn reset(&mut self) {
        self.best_overall.fill(self.unreached);
        for round in &mut self.best_by_round {
            round.fill(self.unreached);
        }
        for round in &mut self.arrivals_by_round {
            for slot in round.iter_mut() {
                *slot = None;
            }
        }
        self.touched.fill(false);
    }

    pub fn num_stops(&self) -> usize {
        self.num_stops
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn best_overall(&self, stop: StopIndex) -> Timestamp {
        self.best_overall[stop as usize]
    }

    pub fn best_in_round(&self, round: usize, stop: StopIndex) -> Timestamp {
        self.best_by_round[round][stop as usize]
    }

    pub fn arrival_at(&self, round: usize, stop: StopIndex) -> Option<&StopArrival> {
        self.arrivals_by_round[round][stop as usize].as_ref()
    }

    /// Accepts `candidate` only if it strictly improves `bestOverall[stop]`
    /// (spec §4.4). Marks the stop touched for the next round's transit scan
    /// when accepted.
    pub fn try_improve(&mut self, round: usize, calc: &dyn TransitCalculator, candidate: StopArrival) -> bool {
        let stop = candidate.stop as usize;
        if !calc.is_better(candidate.arrival_time, self.best_overall[stop]) {
            return false;
        }
        self.best_overall[stop] = candidate.arrival_time;
        self.best_by_round[round][stop] = candidate.arrival_time;
        self.arrivals_by_round[round][stop] = Some(candidate);
        self.touched[stop] = true;
        true
    }

    pub fn is_touched(&self, stop: StopIndex) -> bool {
        self.touched[stop as usize]
    }

    pub fn touched_stops(&self) -> impl Iterator<Item = StopIndex> + '_ {
        self.touched
            .iter()
            .enumerate()
            .filter(|(_, &t)| t)
            .map(|(i, _)| i as StopIndex)
    }

    pub fn clear_touched(&mut self) {
        self.touched.fill(false);
    }
}
