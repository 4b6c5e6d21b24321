//! Destination Arrival Set (DAS, spec §4.6): the pareto set of egress-side
//! arrivals a search keeps across all rounds and iterations. Separate from
//! the per-stop state stores in `state/` because its dominance relation
//! additionally supports a cost-relaxation epsilon (spec §9 Open Questions)
//! that is a per-request knob, not a fixed property of the search.

use crate::fare::tags_match;
use crate::model::{Cost, FareTag, Timestamp};
use crate::response::Path;

/// A reconstructed journey is stored directly rather than a `StopArrival` to
/// look up later: the per-iteration state stores are reset before the next
/// departure minute runs, so a path must be walked out of the predecessor
/// chain while that iteration's store is still live (see `worker`).
#[derive(Debug, Clone)]
pub struct DestinationLabel {
    /// Oriented so smaller is always better, the same convention `McLabel`
    /// uses (see `state::pareto`).
    pub time_rank: Timestamp,
    pub round: u32,
    pub cost: Cost,
    /// Fourth dominance coordinate (spec §4.6): total ride+transfer time,
    /// independent of `time_rank` since two arrivals can tie on arrival time
    /// (or origin departure, for a reverse search) and round while one still
    /// took longer overall, e.g. by waiting idle at a stop.
    pub travel_duration: i64,
    pub fare_tag: Option<FareTag>,
    pub path: Path,
}

/// `ignore_cost` implements the `allow_negative_transfer_allowance` request
/// flag (spec §9 Open Questions): a fare engine that grants a transfer
/// allowance can make a currently-costlier arrival cheaper later than a
/// dominance check run at insertion time can see, so the flag drops cost
/// from the comparison entirely rather than trying to predict the discount.
fn dominates(a: &DestinationLabel, b: &DestinationLabel, epsilon: f64, ignore_cost: bool) -> bool {
    let fare_comparable = match (a.fare_tag, b.fare_tag) {
        (Some(x), Some(y)) => tags_match(x, y),
        _ => true,
    };
    if !fare_comparable {
        return false;
    }
    if ignore_cost {
        let le = a.time_rank <= b.time_rank && a.round <= b.round && a.travel_duration <= b.travel_duration;
        let lt = a.time_rank < b.time_rank || a.round < b.round || a.travel_duration < b.travel_duration;
        return le && lt;
    }
    let le = a.time_rank <= b.time_rank
        && a.round <= b.round
        && a.cost <= b.cost + epsilon
        && (a.travel_duration as f64) <= (b.travel_duration as f64) + epsilon;
    let lt = a.time_rank < b.time_rank
        || a.round < b.round
        || a.cost + epsilon < b.cost
        || (a.travel_duration as f64) + epsilon < (b.travel_duration as f64);
    le && lt
}

/// Unbounded (destination arrivals are naturally few: at most one
/// non-dominated label per `(round, fare tag)` combination).
#[derive(Debug, Default)]
pub struct DestinationArrivalSet {
    entries: Vec<DestinationLabel>,
    evictions: u64,
}

impl DestinationArrivalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DestinationLabel] {
        &self.entries
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `candidate` under the relaxed dominance relation `epsilon`
    /// defines. `ignore_cost` is the `allow_negative_transfer_allowance`
    /// request flag; see `dominates`. Returns whether it survived.
    pub fn try_insert(&mut self, candidate: DestinationLabel, epsilon: f64, ignore_cost: bool) -> bool {
        if self
            .entries
            .iter()
            .any(|existing| dominates(existing, &candidate, epsilon, ignore_cost))
        {
            return false;
        }
        let before = self.entries.len();
        self.entries
            .retain(|existing| !dominates(&candidate, existing, epsilon, ignore_cost));
        self.evictions += (before - self.entries.len()) as u64;
        self.entries.push(candidate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(time_rank: Timestamp, round: u32, cost: f64, travel_duration: i64) -> DestinationLabel {
        DestinationLabel {
            time_rank,
            round,
            cost,
            travel_duration,
            fare_tag: None,
            path: Path {
                legs: Vec::new(),
                departure_time: 0,
                arrival_time: time_rank,
                num_transfers: round.saturating_sub(1),
                travel_duration,
                cost,
            },
        }
    }

    #[test]
    fn exact_dominance_rejects_strictly_worse_label() {
        let mut das = DestinationArrivalSet::new();
        assert!(das.try_insert(label(100, 0, 1.0, 100), 0.0, false));
        assert!(!das.try_insert(label(150, 1, 2.0, 150), 0.0, false));
    }

    #[test]
    fn epsilon_relaxation_absorbs_small_cost_regressions() {
        let mut das = DestinationArrivalSet::new();
        assert!(das.try_insert(label(100, 0, 1.0, 100), 0.5, false));
        // Arrives later, one more round, cost only 0.3 worse: within epsilon,
        // still dominated by the first label on every coordinate.
        assert!(!das.try_insert(label(150, 1, 1.3, 150), 0.5, false));
    }

    #[test]
    fn ignore_cost_lets_a_costlier_arrival_evict_a_cheaper_one() {
        let mut das = DestinationArrivalSet::new();
        assert!(das.try_insert(label(150, 0, 1.0, 150), 0.0, true));
        // Arrives earlier despite costing more: with cost out of the
        // comparison this still dominates on time_rank/round alone.
        assert!(das.try_insert(label(100, 0, 5.0, 100), 0.0, true));
        assert_eq!(das.entries().len(), 1);
        assert_eq!(das.entries()[0].time_rank, 100);
    }

    #[test]
    fn shorter_travel_duration_evicts_a_tied_arrival() {
        let mut das = DestinationArrivalSet::new();
        assert!(das.try_insert(label(100, 0, 1.0, 90), 0.0, false));
        // Same arrival, round, and cost, but a shorter ride: dominates and
        // evicts the slower alternative.
        assert!(das.try_insert(label(100, 0, 1.0, 70), 0.0, false));
        assert_eq!(das.entries().len(), 1);
        assert_eq!(das.entries()[0].travel_duration, 70);
    }

    #[test]
    fn longer_travel_duration_cannot_evict_a_tied_arrival() {
        let mut das = DestinationArrivalSet::new();
        assert!(das.try_insert(label(100, 0, 1.0, 70), 0.0, false));
        assert!(!das.try_insert(label(100, 0, 1.0, 90), 0.0, false));
    }

    #[test]
    fn incomparable_fare_tags_both_survive() {
        let mut das = DestinationArrivalSet::new();
        let mut a = label(100, 0, 1.0, 100);
        a.fare_tag = Some(FareTag { value: 1, expires_at: 10 });
        let mut b = label(100, 0, 1.0, 100);
        b.fare_tag = Some(FareTag { value: 2, expires_at: 10 });
        assert!(das.try_insert(a, 0.0, false));
        assert!(das.try_insert(b, 0.0, false));
        assert_eq!(das.entries().len(), 2);
    }
}
