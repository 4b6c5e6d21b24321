//! Pareto-Set state store (spec §4.5, McRAPTOR): each stop carries a
//! bounded, non-dominated set of arrivals instead of a single scalar. The
//! `ParetoSet<T>` container is generic over whatever dominance relation the
//! caller needs; `McLabel` is the concrete key this crate's worker uses.

use std::cmp::Ordering;

use arrayvec::ArrayVec;

use crate::fare::tags_match;
use crate::model::{FareTag, StopArrival, StopIndex, Timestamp};

/// Sets above this size evict the lexicographically worst member rather
/// than growing further (spec §4.5 "bounded pareto set").
pub const PARETO_SET_CAPACITY: usize = 32;

pub trait Dominance: Clone {
    /// `true` iff `self` is at least as good on every coordinate and
    /// strictly better on at least one — the other label can be discarded.
    fn dominates(&self, other: &Self) -> bool;
}

pub struct ParetoSet<T: Dominance> {
    items: ArrayVec<T, PARETO_SET_CAPACITY>,
    evictions: u64,
}

impl<T: Dominance> Default for ParetoSet<T> {
    fn default() -> Self {
        Self {
            items: ArrayVec::new(),
            evictions: 0,
        }
    }
}

impl<T: Dominance + PartialOrd> ParetoSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Adds `candidate` if it is not dominated by an existing member,
    /// removing any existing members it in turn dominates. When the set is
    /// already at capacity and `candidate` dominates nothing, the
    /// lexicographically worst member is evicted to make room provided the
    /// candidate itself ranks better; otherwise the candidate is dropped and
    /// the set is left unchanged.
    pub fn try_insert(&mut self, candidate: T) -> bool {
        if self.items.iter().any(|existing| existing.dominates(&candidate)) {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|existing| !candidate.dominates(existing));
        let dominated_something = self.items.len() < before;

        if !dominated_something && self.items.is_full() {
            let worst_idx = self
                .items
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                .map(|(idx, _)| idx)
                .expect("full set is non-empty");
            let candidate_is_better = candidate
                .partial_cmp(&self.items[worst_idx])
                .map(|ord| ord == Ordering::Less)
                .unwrap_or(false);
            if !candidate_is_better {
                return false;
            }
            self.items.swap_remove(worst_idx);
            self.evictions += 1;
        }

        self.items.push(candidate);
        true
    }
}

/// Dominance key for a multi-criteria stop arrival. `time_rank` is already
/// oriented so smaller is always better, regardless of search direction —
/// the worker maps the calculator's notion of "better" into this space
/// before constructing a label, so this module never branches on direction.
#[derive(Debug, Clone, PartialEq)]
pub struct McLabel {
    pub time_rank: Timestamp,
    pub arrival: StopArrival,
}

impl McLabel {
    fn fare_tag(&self) -> Option<FareTag> {
        self.arrival.fare_tag
    }
}

impl Dominance for McLabel {
    fn dominates(&self, other: &Self) -> bool {
        let fare_comparable = match (self.fare_tag(), other.fare_tag()) {
            (Some(a), Some(b)) => tags_match(a, b),
            _ => true,
        };
        if !fare_comparable {
            return false;
        }
        let le = self.time_rank <= other.time_rank
            && self.arrival.round <= other.arrival.round
            && self.arrival.cost <= other.arrival.cost;
        let lt = self.time_rank < other.time_rank
            || self.arrival.round < other.arrival.round
            || self.arrival.cost < other.arrival.cost;
        le && lt
    }
}

impl PartialOrd for McLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let primary = self
            .time_rank
            .cmp(&other.time_rank)
            .then(self.arrival.round.cmp(&other.arrival.round));
        if primary != Ordering::Equal {
            return Some(primary);
        }
        self.arrival.cost.partial_cmp(&other.arrival.cost)
    }
}

/// Per-stop, per-round bags of `McLabel`s, reused across range-RAPTOR
/// iterations the same way `BestTimesStore` is (spec §5 arena allocation).
pub struct ParetoStopStore {
    num_stops: usize,
    max_rounds: usize,
    bags: Vec<Vec<ParetoSet<McLabel>>>,
    touched: Vec<bool>,
    max_set_size_seen: usize,
}

impl ParetoStopStore {
    pub fn new(num_stops: usize, max_rounds: usize) -> Self {
        Self {
            num_stops,
            max_rounds,
            bags: (0..=max_rounds)
                .map(|_| (0..num_stops).map(|_| ParetoSet::new()).collect())
                .collect(),
            touched: vec![false; num_stops],
            max_set_size_seen: 0,
        }
    }

    pub fn reset(&mut self) {
        for round in &mut self.bags {
            for bag in round.iter_mut() {
                bag.clear();
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

    pub fn bag(&self, round: usize, stop: StopIndex) -> &[McLabel] {
        self.bags[round][stop as usize].items()
    }

    /// Inserts `candidate` into `stop`'s bag at `round`, pre-mapped onto
    /// `time_rank`. Returns whether it survived dominance filtering.
    pub fn try_insert(&mut self, round: usize, time_rank: Timestamp, candidate: StopArrival) -> bool {
        let stop = candidate.stop as usize;
        let label = McLabel {
            time_rank,
            arrival: candidate,
        };
        let inserted = self.bags[round][stop].try_insert(label);
        if inserted {
            self.touched[stop] = true;
            self.max_set_size_seen = self.max_set_size_seen.max(self.bags[round][stop].len());
        }
        inserted
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

    pub fn total_evictions(&self) -> u64 {
        self.bags.iter().flatten().map(|b| b.evictions()).sum()
    }

    pub fn max_set_size_seen(&self) -> usize {
        self.max_set_size_seen
    }
}
