//! Path Mapper (PM, spec §4.7): walks a `StopArrival`'s predecessor chain
//! back to round 0 and emits the legs in chronological order. Every
//! `StopArrival` carries real wall-clock departure/arrival times regardless
//! of search direction, but a reverse (arrive-by) search walks the pattern
//! back to front, so a `Predecessor::Transit`/`Transfer`'s `board`/`alight`
//! (`from`/`to`) fields hold the *later*/*earlier* stop in that case rather
//! than the board/alight stop itself — `reconstruct` swaps them back into
//! physical order before building each `PathLeg`.

use crate::calculator::Direction;
use crate::error::SearchFault;
use crate::model::{Predecessor, StopArrival, StopIndex, Timestamp};
use crate::response::PathLeg;
use crate::state::best_times::BestTimesStore;
use crate::state::pareto::ParetoStopStore;

/// A chain walk exceeding this many legs is treated as a bug rather than an
/// unusually long itinerary (spec §5 "failure isolation").
const MAX_LEGS: usize = 100;

/// What the Path Mapper needs from a state store: the single arrival that
/// produced a given `(round, stop)` pair, identified by the antecedent
/// arrival time recorded in the `Predecessor` that points to it.
pub trait ArrivalLookup {
    fn lookup(&self, round: usize, stop: StopIndex, expected_arrival_time: Timestamp) -> Option<StopArrival>;
}

impl ArrivalLookup for BestTimesStore {
    fn lookup(&self, round: usize, stop: StopIndex, expected_arrival_time: Timestamp) -> Option<StopArrival> {
        self.arrival_at(round, stop)
            .filter(|a| a.arrival_time == expected_arrival_time)
            .cloned()
    }
}

impl ArrivalLookup for ParetoStopStore {
    fn lookup(&self, round: usize, stop: StopIndex, expected_arrival_time: Timestamp) -> Option<StopArrival> {
        self.bag(round, stop)
            .iter()
            .find(|label| label.arrival.arrival_time == expected_arrival_time)
            .map(|label| label.arrival.clone())
    }
}

/// Reconstructs the chain of legs ending at `final_arrival`, prepended by the
/// leg connecting it to the side of the journey the search collected results
/// at: an egress leg for a forward search, an access leg (via
/// `outer_leg_time` computed from `TransitCalculator::origin_departure_time`)
/// for a reverse one. Legs come back sorted by departure time, oldest first,
/// regardless of which direction produced them.
pub fn reconstruct(
    store: &dyn ArrivalLookup,
    final_arrival: &StopArrival,
    outer_leg_time: Timestamp,
    direction: Direction,
) -> Result<Vec<PathLeg>, SearchFault> {
    let mut legs = match direction {
        Direction::Forward => vec![PathLeg::Egress {
            stop: final_arrival.stop,
            departure_time: final_arrival.arrival_time,
            arrival_time: outer_leg_time,
        }],
        Direction::Reverse => vec![PathLeg::Access {
            stop: final_arrival.stop,
            departure_time: outer_leg_time,
            arrival_time: final_arrival.arrival_time,
        }],
    };

    let mut current = final_arrival.clone();
    let mut round = current.round as usize;
    let mut steps = 0usize;

    loop {
        steps += 1;
        if steps > MAX_LEGS {
            return Err(SearchFault::InfiniteLoop { max_legs: MAX_LEGS });
        }
        match current.predecessor {
            Predecessor::Access { .. } => {
                match direction {
                    Direction::Forward => legs.push(PathLeg::Access {
                        stop: current.stop,
                        departure_time: current.departure_time,
                        arrival_time: current.arrival_time,
                    }),
                    // Round 0 was seeded from the egress leg: `departure_time`
                    // holds the real destination arrival, `arrival_time` the
                    // real time at this stop before that leg.
                    Direction::Reverse => legs.push(PathLeg::Egress {
                        stop: current.stop,
                        departure_time: current.arrival_time,
                        arrival_time: current.departure_time,
                    }),
                }
                break;
            }
            Predecessor::Transit {
                board_stop,
                board_time,
                board_arrival_time,
                trip,
            } => {
                // Forward: `board_stop`/`board_time` already are the board
                // side. Reverse walked this pattern back to front, so they're
                // the *alight* side instead and `current` holds the board side.
                let (leg_board_stop, leg_board_time, leg_alight_stop, leg_alight_time) = match direction {
                    Direction::Forward => (board_stop, board_time, current.stop, current.arrival_time),
                    Direction::Reverse => (current.stop, current.arrival_time, board_stop, board_time),
                };
                legs.push(PathLeg::Transit {
                    trip,
                    board_stop: leg_board_stop,
                    board_time: leg_board_time,
                    alight_stop: leg_alight_stop,
                    alight_time: leg_alight_time,
                });
                if round == 0 {
                    log::error!("broken predecessor chain at stop {board_stop}, round 0.");
                    return Err(SearchFault::BrokenPredecessorChain {
                        stop: board_stop,
                        round: round as u32,
                    });
                }
                let prev_round = round - 1;
                current = store.lookup(prev_round, board_stop, board_arrival_time).ok_or_else(|| {
                    log::error!("broken predecessor chain at stop {board_stop}, round {prev_round}.");
                    SearchFault::BrokenPredecessorChain {
                        stop: board_stop,
                        round: prev_round as u32,
                    }
                })?;
                round = prev_round;
            }
            Predecessor::Transfer {
                from_stop,
                duration_seconds: _,
            } => {
                // Same swap as the transit case: reverse recorded the
                // footpath from the physical destination side back to
                // `from_stop`, not the other way around.
                let (leg_from, leg_to, leg_departure, leg_arrival) = match direction {
                    Direction::Forward => (from_stop, current.stop, current.departure_time, current.arrival_time),
                    Direction::Reverse => (current.stop, from_stop, current.arrival_time, current.departure_time),
                };
                legs.push(PathLeg::Transfer {
                    from_stop: leg_from,
                    to_stop: leg_to,
                    departure_time: leg_departure,
                    arrival_time: leg_arrival,
                });
                current = store
                    .lookup(round, from_stop, current.departure_time)
                    .ok_or(SearchFault::BrokenPredecessorChain {
                        stop: from_stop,
                        round: round as u32,
                    })?;
            }
        }
    }

    legs.sort_by_key(|leg| leg.departure_time());
    Ok(legs)
}

/// Sums a reconstructed leg list into the aggregate fields `Path` reports
/// alongside the legs themselves.
pub fn summarize(legs: &[PathLeg]) -> (Timestamp, Timestamp, i64) {
    let departure_time = legs.first().map(|l| l.departure_time()).unwrap_or(0);
    let arrival_time = legs.last().map(|l| l.arrival_time()).unwrap_or(0);
    (departure_time, arrival_time, arrival_time - departure_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ForwardCalculator;
    use crate::model::GlobalTripRef;

    #[test]
    fn reconstructs_single_transit_hop() {
        let calc = ForwardCalculator;
        let mut store = BestTimesStore::new(&calc, 3, 1);

        let access = StopArrival {
            stop: 0,
            round: 0,
            arrival_time: 0,
            departure_time: 0,
            travel_duration: 0,
            cost: 0.0,
            predecessor: Predecessor::Access { duration_seconds: 0 },
            fare_tag: None,
        };
        store.try_improve(0, &calc, access.clone());

        let transit = StopArrival {
            stop: 2,
            round: 1,
            arrival_time: 240,
            departure_time: 0,
            travel_duration: 240,
            cost: 0.0,
            predecessor: Predecessor::Transit {
                board_stop: 0,
                board_time: 0,
                board_arrival_time: 0,
                trip: GlobalTripRef { pattern: 0, trip: 0 },
            },
            fare_tag: None,
        };
        store.try_improve(1, &calc, transit.clone());

        let legs = reconstruct(&store, &transit, 260, Direction::Forward).unwrap();
        assert_eq!(legs.len(), 3);
        assert!(matches!(legs[0], PathLeg::Access { .. }));
        assert!(matches!(legs[1], PathLeg::Transit { .. }));
        assert!(matches!(legs[2], PathLeg::Egress { .. }));
        assert_eq!(legs[0].departure_time(), 0);
        assert_eq!(legs[2].arrival_time(), 260);
    }

    #[test]
    fn broken_chain_is_reported_as_search_fault() {
        let calc = ForwardCalculator;
        let store = BestTimesStore::new(&calc, 2, 1);
        let orphan = StopArrival {
            stop: 1,
            round: 1,
            arrival_time: 100,
            departure_time: 0,
            travel_duration: 100,
            cost: 0.0,
            predecessor: Predecessor::Transit {
                board_stop: 0,
                board_time: 0,
                board_arrival_time: 0,
                trip: GlobalTripRef { pattern: 0, trip: 0 },
            },
            fare_tag: None,
        };
        let result = reconstruct(&store, &orphan, 110, Direction::Forward);
        assert!(matches!(result, Err(SearchFault::BrokenPredecessorChain { .. })));
    }

    #[test]
    fn reverse_reconstructs_the_mirrored_direct_trip() {
        let calc = crate::calculator::ReverseCalculator;
        let mut store = BestTimesStore::new(&calc, 2, 1);

        // Round 0 seeded from the egress leg: a deadline of 240 at stop 1.
        let egress_seed = StopArrival {
            stop: 1,
            round: 0,
            arrival_time: 240,
            departure_time: 240,
            travel_duration: 0,
            cost: 0.0,
            predecessor: Predecessor::Access { duration_seconds: 0 },
            fare_tag: None,
        };
        store.try_improve(0, &calc, egress_seed.clone());

        // Round 1: walking the pattern back to front, `board_stop`/`board_time`
        // hold the physical alight side (stop 1 at 240).
        let transit = StopArrival {
            stop: 0,
            round: 1,
            arrival_time: 0,
            departure_time: 240,
            travel_duration: 240,
            cost: 0.0,
            predecessor: Predecessor::Transit {
                board_stop: 1,
                board_time: 240,
                board_arrival_time: 240,
                trip: GlobalTripRef { pattern: 0, trip: 0 },
            },
            fare_tag: None,
        };
        store.try_improve(1, &calc, transit.clone());

        let legs = reconstruct(&store, &transit, 0, Direction::Reverse).unwrap();
        assert_eq!(legs.len(), 3);
        assert!(matches!(legs[0], PathLeg::Access { .. }));
        assert!(matches!(legs[1], PathLeg::Transit { .. }));
        assert!(matches!(legs[2], PathLeg::Egress { .. }));
        match legs[1] {
            PathLeg::Transit {
                board_stop,
                board_time,
                alight_stop,
                alight_time,
                ..
            } => {
                assert_eq!((board_stop, board_time), (0, 0));
                assert_eq!((alight_stop, alight_time), (1, 240));
            }
            _ => unreachable!(),
        }
        assert_eq!(legs[0].departure_time(), 0);
        assert_eq!(legs[2].arrival_time(), 240);
    }
}
