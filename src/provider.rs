//! Transit Data Provider (TDP, spec §2/§4/§6): the read-only view onto the
//! transit network the search runs over. Produced by an external build
//! pipeline and immutable for the duration of a request — the core never
//! mutates it and never cares how it was built (GTFS ingestion, OSM tag
//! interpretation and the like all live outside this crate).

use std::collections::HashMap;

use crate::error::ProviderError;
use crate::model::{Pattern, PatternIndex, Stop, StopIndex, Transfer, TripIndex, TripSchedule};

/// Where a stop sits within a pattern: used to answer
/// `patterns_containing_stop` without scanning every pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStopRef {
    pub pattern: PatternIndex,
    pub position: u32,
}

/// Narrow, read-only contract the search algorithms consume (spec §6).
/// Anything that can answer these five questions is a valid transit network
/// for the purposes of this crate — street graphs, fare rules, and
/// persistence are someone else's problem.
pub trait TransitDataProvider: Sync {
    fn num_stops(&self) -> usize;

    fn stop(&self, stop: StopIndex) -> &Stop;

    /// Every (pattern, position-in-pattern) pair in which `stop` appears.
    fn patterns_containing_stop(&self, stop: StopIndex) -> &[PatternStopRef];

    fn num_patterns(&self) -> usize;

    fn pattern(&self, pattern: PatternIndex) -> &Pattern;

    fn num_trips(&self, pattern: PatternIndex) -> usize;

    fn trip_schedule(&self, pattern: PatternIndex, trip: crate::model::TripIndex) -> &TripSchedule;

    fn transfers_from(&self, stop: StopIndex) -> &[Transfer];
}

/// A plain in-memory `TransitDataProvider`, suitable both as a reference
/// implementation and as the fixture format used by this crate's own tests
/// and benchmarks. Trip schedules are validated for monotonicity at
/// construction time (spec §5 "Failure isolation").
pub struct InMemoryProvider {
    stops: Vec<Stop>,
    patterns: Vec<Pattern>,
    trip_schedules: Vec<Vec<TripSchedule>>,
    patterns_by_stop: Vec<Vec<PatternStopRef>>,
    transfers_by_stop: Vec<Vec<Transfer>>,
}

impl InMemoryProvider {
    pub fn builder(num_stops: usize) -> InMemoryProviderBuilder {
        InMemoryProviderBuilder {
            num_stops,
            patterns: Vec::new(),
            trip_schedules: Vec::new(),
            transfers: Vec::new(),
        }
    }
}

impl TransitDataProvider for InMemoryProvider {
    fn num_stops(&self) -> usize {
        self.stops.len()
    }

    fn stop(&self, stop: StopIndex) -> &Stop {
        &self.stops[stop as usize]
    }

    fn patterns_containing_stop(&self, stop: StopIndex) -> &[PatternStopRef] {
        &self.patterns_by_stop[stop as usize]
    }

    fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    fn pattern(&self, pattern: PatternIndex) -> &Pattern {
        &self.patterns[pattern as usize]
    }

    fn num_trips(&self, pattern: PatternIndex) -> usize {
        self.trip_schedules[pattern as usize].len()
    }

    fn trip_schedule(&self, pattern: PatternIndex, trip: crate::model::TripIndex) -> &TripSchedule {
        &self.trip_schedules[pattern as usize][trip as usize]
    }

    fn transfers_from(&self, stop: StopIndex) -> &[Transfer] {
        &self.transfers_by_stop[stop as usize]
    }
}

/// Builds an `InMemoryProvider`, checking the invariants spec §3 assumes
/// hold on input (chiefly: trips within a pattern do not overtake each
/// other) before the search ever sees them.
pub struct InMemoryProviderBuilder {
    num_stops: usize,
    patterns: Vec<Pattern>,
    trip_schedules: Vec<Vec<TripSchedule>>,
    transfers: Vec<Transfer>,
}

impl InMemoryProviderBuilder {
    /// Adds a pattern with its trips, already sorted by departure at stop 0
    /// (the order the caller's build pipeline is expected to have produced).
    /// Returns the new pattern's index.
    pub fn add_pattern(
        &mut self,
        stops: Vec<StopIndex>,
        trips: Vec<TripSchedule>,
    ) -> Result<PatternIndex, ProviderError> {
        let pattern_idx = self.patterns.len() as PatternIndex;
        for (trip_idx, trip) in trips.iter().enumerate() {
            if trip.num_stops() != stops.len() {
                return Err(ProviderError::TripScheduleLengthMismatch {
                    pattern: pattern_idx,
                    expected: stops.len(),
                    got: trip.num_stops(),
                });
            }
        }
        check_monotone(pattern_idx, &trips)?;
        self.patterns.push(Pattern { stops });
        self.trip_schedules.push(trips);
        Ok(pattern_idx)
    }

    pub fn add_transfer(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }

    pub fn build(self) -> InMemoryProvider {
        let stops = (0..self.num_stops)
            .map(|_| Stop {
                wheelchair_accessible: true,
            })
            .collect::<Vec<_>>();

        let mut patterns_by_stop = vec![Vec::new(); self.num_stops];
        for (pattern_idx, pattern) in self.patterns.iter().enumerate() {
            for (position, &stop) in pattern.stops.iter().enumerate() {
                patterns_by_stop[stop as usize].push(PatternStopRef {
                    pattern: pattern_idx as PatternIndex,
                    position: position as u32,
                });
            }
        }

        let num_transfers = self.transfers.len();
        let mut transfers_by_stop = vec![Vec::new(); self.num_stops];
        for transfer in self.transfers {
            transfers_by_stop[transfer.from_stop as usize].push(transfer);
        }

        log::info!(
            "network has {} stops, {} patterns and {} transfers.",
            stops.len(),
            self.patterns.len(),
            num_transfers
        );

        InMemoryProvider {
            stops,
            patterns: self.patterns,
            trip_schedules: self.trip_schedules,
            patterns_by_stop,
            transfers_by_stop,
        }
    }
}

/// Enforces spec §3's non-overtaking invariant: if trip *a* departs stop 0
/// before trip *b*, *a* must arrive at every stop no later than *b*. Trips
/// are assumed pre-sorted by departure at stop 0, so this only needs to
/// compare adjacent trips.
fn check_monotone(
    pattern: PatternIndex,
    trips: &[TripSchedule],
) -> Result<(), ProviderError> {
    for (idx, window) in trips.windows(2).enumerate() {
        let (earlier, later) = (&window[0], &window[1]);
        for stop in 0..earlier.num_stops() {
            if later.arrival[stop] < earlier.arrival[stop] {
                log::warn!(
                    "pattern {pattern} trip {} overtakes trip {idx} at stop {stop}.",
                    idx + 1
                );
                return Err(ProviderError::NonMonotonePattern {
                    pattern,
                    earlier_trip: idx as TripIndex,
                    later_trip: (idx + 1) as TripIndex,
                    stop: stop as StopIndex,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TripSchedule;

    fn trip(arrival: Vec<i64>, departure: Vec<i64>) -> TripSchedule {
        TripSchedule { arrival, departure }
    }

    #[test]
    fn accepts_monotone_trips() {
        let mut builder = InMemoryProvider::builder(3);
        let result = builder.add_pattern(
            vec![0, 1, 2],
            vec![
                trip(vec![0, 60, 120], vec![0, 60, 120]),
                trip(vec![100, 160, 220], vec![100, 160, 220]),
            ],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_overtaking_trips() {
        let mut builder = InMemoryProvider::builder(3);
        let result = builder.add_pattern(
            vec![0, 1, 2],
            vec![
                trip(vec![0, 60, 200], vec![0, 60, 200]),
                trip(vec![100, 160, 180], vec![100, 160, 180]),
            ],
        );
        assert!(matches!(
            result,
            Err(ProviderError::NonMonotonePattern { .. })
        ));
    }

    #[test]
    fn patterns_containing_stop_is_indexed() {
        let mut builder = InMemoryProvider::builder(3);
        builder
            .add_pattern(vec![0, 1, 2], vec![trip(vec![0, 60, 120], vec![0, 60, 120])])
            .unwrap();
        let provider = builder.build();
        assert_eq!(provider.patterns_containing_stop(1).len(), 1);
        assert_eq!(provider.patterns_containing_stop(1)[0].position, 1);
    }
}
