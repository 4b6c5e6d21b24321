//! Multi-criteria profile (McRAPTOR, spec §4.5): each stop keeps a bounded,
//! non-dominated bag of arrivals instead of one scalar. The route scan
//! mirrors `range_raptor`'s but tracks a small set of concurrently boarded
//! trips per pattern — one per distinct non-dominated label a marked stop
//! offered to board from — instead of a single "current best" trip.

use std::collections::HashMap;

use crate::calculator::TransitCalculator;
use crate::destination::{DestinationArrivalSet, DestinationLabel};
use crate::error::CoreError;
use crate::fare::{FareTransferObserver, NoFareObserver};
use crate::hooks::SearchLifecycle;
use crate::model::{FareTag, GlobalTripRef, Predecessor, StopArrival, StopIndex, Timestamp, TripIndex};
use crate::path;
use crate::provider::TransitDataProvider;
use crate::request::{Direction, Request};
use crate::response::{Diagnostics, Path, Response};
use crate::state::pareto::{McLabel, ParetoStopStore, PARETO_SET_CAPACITY};

use super::{board_trip, candidate_patterns, collect_legs, schedule_time_at, seed_legs, Role};

/// A trip currently possible to be riding while scanning a pattern,
/// together with the label that boarded it. Capped at the same size as a
/// pareto set: beyond this, the oldest track is dropped rather than growing
/// scan cost unboundedly (documented simplification, see repository notes).
struct Track {
    trip: TripIndex,
    board_stop: StopIndex,
    board_time: Timestamp,
    board_arrival_time: Timestamp,
    board_cost: f64,
    board_fare_tag: Option<FareTag>,
}

pub fn run(
    provider: &dyn TransitDataProvider,
    request: &Request,
    calc: &dyn TransitCalculator,
    lifecycle: &dyn SearchLifecycle,
) -> Result<Response, CoreError> {
    let max_rounds = request.max_rounds() as usize;
    let num_stops = provider.num_stops();
    let mut store = ParetoStopStore::new(num_stops, max_rounds);
    let mut das = DestinationArrivalSet::new();
    let mut diagnostics = Diagnostics::default();
    let default_observer = NoFareObserver;
    let fare_observer: &dyn FareTransferObserver = request
        .fare_observer
        .as_deref()
        .unwrap_or(&default_observer);

    let departures = calc.iteration_departures(
        request.earliest_departure_time,
        request.search_window_seconds,
        request.iteration_step_seconds,
    );

    for departure in departures {
        store.reset();
        diagnostics.iterations += 1;
        lifecycle.on_setup_iteration(departure);

        for leg in seed_legs(request, calc.direction()) {
            let arrival_time = calc.add(departure, leg.duration_seconds);
            let candidate = StopArrival {
                stop: leg.stop,
                round: 0,
                arrival_time,
                departure_time: departure,
                travel_duration: (arrival_time - departure).abs(),
                cost: leg.cost,
                predecessor: Predecessor::Access {
                    duration_seconds: leg.duration_seconds,
                },
                fare_tag: None,
            };
            store.try_insert(0, calc.rank(arrival_time), candidate);
        }

        for round in 1..=max_rounds {
            let marked: Vec<StopIndex> = store.touched_stops().collect();
            if marked.is_empty() {
                break;
            }
            store.clear_touched();

            // Previous round's bags don't change during this round's scan;
            // snapshot them up front so the scan below doesn't need to
            // interleave reads of `store` with the mutable inserts it makes.
            let mut prev_bags: HashMap<StopIndex, Vec<McLabel>> = HashMap::new();
            for &stop in &marked {
                prev_bags.insert(stop, store.bag(round - 1, stop).to_vec());
            }

            for pattern in candidate_patterns(provider, &marked) {
                diagnostics.patterns_scanned += 1;
                let pat = provider.pattern(pattern);
                let order = calc.stop_order(pat.num_stops());

                let mut tracks: Vec<Track> = Vec::new();

                for pos in order {
                    let stop = pat.stops[pos];

                    for track in &tracks {
                        let arrival_time = schedule_time_at(calc, provider, pattern, track.trip, pos, Role::Alight);
                        let fare_outcome = fare_observer.evaluate(
                            track.board_fare_tag,
                            pattern,
                            GlobalTripRef {
                                pattern,
                                trip: track.trip,
                            },
                            track.board_stop,
                            track.board_time,
                            stop,
                            arrival_time,
                        );
                        let candidate = StopArrival {
                            stop,
                            round: round as u32,
                            arrival_time,
                            departure_time: track.board_time,
                            travel_duration: (arrival_time - departure).abs(),
                            cost: track.board_cost + fare_outcome.cost,
                            predecessor: Predecessor::Transit {
                                board_stop: track.board_stop,
                                board_time: track.board_time,
                                board_arrival_time: track.board_arrival_time,
                                trip: GlobalTripRef {
                                    pattern,
                                    trip: track.trip,
                                },
                            },
                            fare_tag: Some(fare_outcome.tag),
                        };
                        store.try_insert(round, calc.rank(arrival_time), candidate);
                    }

                    if let Some(labels) = prev_bags.get(&stop) {
                        for label in labels {
                            let threshold =
                                calc.earliest_board_time(label.arrival.arrival_time, request.board_slack_seconds);
                            if let Some((trip, _)) =
                                board_trip(calc, provider, pattern, pos, threshold, None, request.service_filter.as_ref())
                            {
                                let board_time = schedule_time_at(calc, provider, pattern, trip, pos, Role::Board);
                                tracks.push(Track {
                                    trip,
                                    board_stop: stop,
                                    board_time,
                                    board_arrival_time: label.arrival.arrival_time,
                                    board_cost: label.arrival.cost,
                                    board_fare_tag: label.arrival.fare_tag,
                                });
                                if tracks.len() > PARETO_SET_CAPACITY {
                                    tracks.remove(0);
                                }
                            }
                        }
                    }
                }
            }

            let transit_touched: Vec<StopIndex> = store.touched_stops().collect();
            for stop in transit_touched {
                let labels = store.bag(round, stop).to_vec();
                for current in labels {
                    for transfer in provider.transfers_from(stop) {
                        let arrival_time = calc.add(current.arrival.arrival_time, transfer.duration_seconds);
                        let candidate = StopArrival {
                            stop: transfer.to_stop,
                            round: round as u32,
                            arrival_time,
                            departure_time: current.arrival.arrival_time,
                            travel_duration: (arrival_time - departure).abs(),
                            cost: current.arrival.cost + transfer.cost,
                            predecessor: Predecessor::Transfer {
                                from_stop: stop,
                                duration_seconds: transfer.duration_seconds,
                            },
                            fare_tag: current.arrival.fare_tag,
                        };
                        store.try_insert(round, calc.rank(arrival_time), candidate);
                    }
                }
            }

            let destination_reached = collect_legs(request, calc.direction())
                .iter()
                .any(|leg| !store.bag(round, leg.stop).is_empty());
            lifecycle.on_round_complete(round as u32, destination_reached);
        }

        for round in 0..=max_rounds {
            for leg in collect_legs(request, calc.direction()) {
                for label in store.bag(round, leg.stop) {
                    let outer_leg_time = match calc.direction() {
                        Direction::Forward => calc.add(label.arrival.arrival_time, leg.duration_seconds),
                        Direction::Reverse => calc.origin_departure_time(
                            label.arrival.arrival_time,
                            leg.duration_seconds,
                            request.board_slack_seconds,
                        ),
                    };
                    let legs = path::reconstruct(&store, &label.arrival, outer_leg_time, calc.direction())?;
                    let (departure_time, arrival_time, travel_duration) = path::summarize(&legs);
                    let path = Path {
                        legs,
                        departure_time,
                        arrival_time,
                        num_transfers: (round as u32).saturating_sub(1),
                        travel_duration,
                        cost: label.arrival.cost + leg.cost,
                    };
                    let destination_label = DestinationLabel {
                        time_rank: calc.rank(outer_leg_time),
                        round: round as u32,
                        cost: path.cost,
                        travel_duration: path.travel_duration,
                        fare_tag: label.arrival.fare_tag,
                        path,
                    };
                    das.try_insert(destination_label, request.cost_relaxation_epsilon, request.allow_negative_transfer_allowance);
                }
            }
        }

        lifecycle.on_iteration_complete();
    }

    diagnostics.rounds = max_rounds as u32;
    diagnostics.pareto_evictions = store.total_evictions() + das.evictions();
    diagnostics.max_pareto_set_size = store.max_set_size_seen().max(das.entries().len());

    let paths = das.entries().iter().map(|label| label.path.clone()).collect();
    Ok(Response {
        paths,
        partial: false,
        diagnostics,
    })
}
