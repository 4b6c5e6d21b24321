//! Synthetic networks shared by this workspace's tests and benchmarks.
//! Small, hand-built `InMemoryProvider`s instead of a GTFS feed: this crate's
//! core has no GTFS ingestion of its own, so a benchmark exercising it needs
//! its networks built directly against the provider trait.

use access_raptor::model::{StopIndex, TripSchedule};
use access_raptor::{InMemoryProvider, InMemoryProviderBuilder};

/// Two stops, one trip departing stop 0 at `t=0` and arriving stop 1 at
/// `t=240`. The simplest possible direct-connection network.
pub fn single_trip_network() -> (InMemoryProvider, StopIndex, StopIndex) {
    let mut builder = InMemoryProvider::builder(2);
    builder
        .add_pattern(
            vec![0, 1],
            vec![TripSchedule {
                arrival: vec![0, 240],
                departure: vec![0, 240],
            }],
        )
        .unwrap();
    (builder.build(), 0, 1)
}

/// Three stops on two patterns sharing stop 1: pattern A runs 0→1, pattern B
/// runs 1→2, 120 seconds apart, so reaching stop 2 needs exactly one
/// transfer at stop 1.
pub fn one_transfer_network() -> (InMemoryProvider, StopIndex, StopIndex) {
    let mut builder = InMemoryProvider::builder(3);
    builder
        .add_pattern(
            vec![0, 1],
            vec![TripSchedule {
                arrival: vec![0, 120],
                departure: vec![0, 120],
            }],
        )
        .unwrap();
    builder
        .add_pattern(
            vec![1, 2],
            vec![TripSchedule {
                arrival: vec![180, 300],
                departure: vec![180, 300],
            }],
        )
        .unwrap();
    (builder.build(), 0, 2)
}

/// Boarding-threshold edge case: an arrival of `120` at stop 1 with a
/// 60-second board slack produces an earliest boardable time of `180` —
/// exactly the departure of the connecting trip, so the trip is boardable
/// only because the threshold comparison is non-strict.
pub fn exact_threshold_transfer_network() -> (InMemoryProvider, StopIndex, StopIndex) {
    one_transfer_network()
}

/// Six trips on one pattern at a 60-second headway, each taking exactly 240
/// seconds end to end. Pairing this with a departure window of 300 seconds
/// and a 60-second iteration step makes every range-RAPTOR iteration board a
/// distinct trip, producing six non-overlapping direct paths.
pub fn six_trip_headway_network() -> (InMemoryProvider, StopIndex, StopIndex) {
    let mut builder = InMemoryProvider::builder(2);
    let trips = (0..6)
        .map(|i| {
            let base = i * 60;
            TripSchedule {
                arrival: vec![base, base + 240],
                departure: vec![base, base + 240],
            }
        })
        .collect();
    builder.add_pattern(vec![0, 1], trips).unwrap();
    (builder.build(), 0, 1)
}

/// A linear chain of `num_stops` stops, one pattern per adjacent pair,
/// `trips_per_pattern` trips each at `headway_seconds` apart, plus a
/// same-direction footpath of `transfer_seconds` between every adjacent
/// stop pair. Used for randomized stress tests exercising many rounds and
/// many patterns.
pub fn chain_network(
    num_stops: usize,
    trips_per_pattern: usize,
    headway_seconds: i64,
    hop_duration_seconds: i64,
    transfer_seconds: i64,
) -> InMemoryProvider {
    let mut builder = InMemoryProvider::builder(num_stops);
    for pair in 0..num_stops.saturating_sub(1) {
        let from = pair as StopIndex;
        let to = (pair + 1) as StopIndex;
        let trips = (0..trips_per_pattern)
            .map(|i| {
                let base = (i as i64) * headway_seconds;
                TripSchedule {
                    arrival: vec![base, base + hop_duration_seconds],
                    departure: vec![base, base + hop_duration_seconds],
                }
            })
            .collect();
        builder.add_pattern(vec![from, to], trips).unwrap();
        builder.add_transfer(access_raptor::model::Transfer {
            from_stop: from,
            to_stop: to,
            duration_seconds: transfer_seconds,
            cost: 0.0,
        });
    }
    builder.build()
}

/// A `chain_network` with randomized headways and hop durations, seeded for
/// reproducibility. `seed` fixes the sequence `fastrand` produces.
pub fn randomized_chain_network(num_stops: usize, trips_per_pattern: usize, seed: u64) -> InMemoryProvider {
    fastrand::seed(seed);
    let mut builder = InMemoryProvider::builder(num_stops);
    for pair in 0..num_stops.saturating_sub(1) {
        let from = pair as StopIndex;
        let to = (pair + 1) as StopIndex;
        let headway = 60 + fastrand::i64(0..180);
        let hop_duration = 60 + fastrand::i64(0..600);
        let mut trips = Vec::with_capacity(trips_per_pattern);
        let mut t = 0i64;
        for _ in 0..trips_per_pattern {
            trips.push(TripSchedule {
                arrival: vec![t, t + hop_duration],
                departure: vec![t, t + hop_duration],
            });
            t += headway;
        }
        builder.add_pattern(vec![from, to], trips).unwrap();
    }
    builder.build()
}

/// Exposes the builder directly for tests that need a shape none of the
/// canned networks above provide.
pub fn builder(num_stops: usize) -> InMemoryProviderBuilder {
    InMemoryProvider::builder(num_stops)
}
