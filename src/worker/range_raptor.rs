//! Best-Times profile: one scalar arrival per stop per round (spec §4.4).
//! The classic range-RAPTOR loop — iterate departure minutes, then rounds,
//! then patterns, then transfers — reusing one `BestTimesStore` arena across
//! every departure minute in the search window (spec §5).

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
use crate::state::best_times::BestTimesStore;

use super::{board_trip, candidate_patterns, collect_legs, schedule_time_at, seed_legs, Role};

pub fn run(
    provider: &dyn TransitDataProvider,
    request: &Request,
    calc: &dyn TransitCalculator,
    lifecycle: &dyn SearchLifecycle,
) -> Result<Response, CoreError> {
    let max_rounds = request.max_rounds() as usize;
    let num_stops = provider.num_stops();
    let mut store = BestTimesStore::new(calc, num_stops, max_rounds);
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
            store.try_improve(0, calc, candidate);
        }

        for round in 1..=max_rounds {
            let marked: Vec<StopIndex> = store.touched_stops().collect();
            if marked.is_empty() {
                break;
            }
            store.clear_touched();

            for pattern in candidate_patterns(provider, &marked) {
                diagnostics.patterns_scanned += 1;
                let pat = provider.pattern(pattern);
                let order = calc.stop_order(pat.num_stops());

                struct Boarded {
                    trip: TripIndex,
                    board_stop: StopIndex,
                    board_time: Timestamp,
                    board_arrival_time: Timestamp,
                    board_fare_tag: Option<FareTag>,
                    board_cost: f64,
                }
                let mut boarded: Option<Boarded> = None;

                for pos in order {
                    let stop = pat.stops[pos];

                    if let Some(b) = &boarded {
                        let arrival_time = schedule_time_at(calc, provider, pattern, b.trip, pos, Role::Alight);
                        let fare_outcome = fare_observer.evaluate(
                            b.board_fare_tag,
                            pattern,
                            GlobalTripRef { pattern, trip: b.trip },
                            b.board_stop,
                            b.board_time,
                            stop,
                            arrival_time,
                        );
                        let candidate = StopArrival {
                            stop,
                            round: round as u32,
                            arrival_time,
                            departure_time: b.board_time,
                            travel_duration: (arrival_time - departure).abs(),
                            cost: b.board_cost + fare_outcome.cost,
                            predecessor: Predecessor::Transit {
                                board_stop: b.board_stop,
                                board_time: b.board_time,
                                board_arrival_time: b.board_arrival_time,
                                trip: GlobalTripRef { pattern, trip: b.trip },
                            },
                            fare_tag: Some(fare_outcome.tag),
                        };
                        store.try_improve(round, calc, candidate);
                    }

                    if let Some(prev_arrival) = store.arrival_at(round - 1, stop) {
                        let threshold = calc.earliest_board_time(prev_arrival.arrival_time, request.board_slack_seconds);
                        let bound = boarded.as_ref().map(|b| b.trip);
                        if let Some((trip, _)) = board_trip(
                            calc,
                            provider,
                            pattern,
                            pos,
                            threshold,
                            bound,
                            request.service_filter.as_ref(),
                        ) {
                            let board_time = schedule_time_at(calc, provider, pattern, trip, pos, Role::Board);
                            boarded = Some(Boarded {
                                trip,
                                board_stop: stop,
                                board_time,
                                board_arrival_time: prev_arrival.arrival_time,
                                board_fare_tag: prev_arrival.fare_tag,
                                board_cost: prev_arrival.cost,
                            });
                        }
                    }
                }
            }

            let transit_touched: Vec<StopIndex> = store.touched_stops().collect();
            for stop in transit_touched {
                let current = store.arrival_at(round, stop).cloned();
                let Some(current) = current else { continue };
                for transfer in provider.transfers_from(stop) {
                    let arrival_time = calc.add(current.arrival_time, transfer.duration_seconds);
                    let candidate = StopArrival {
                        stop: transfer.to_stop,
                        round: round as u32,
                        arrival_time,
                        departure_time: current.arrival_time,
                        travel_duration: (arrival_time - departure).abs(),
                        cost: current.cost + transfer.cost,
                        predecessor: Predecessor::Transfer {
                            from_stop: stop,
                            duration_seconds: transfer.duration_seconds,
                        },
                        fare_tag: current.fare_tag,
                    };
                    store.try_improve(round, calc, candidate);
                }
            }

            let destination_reached = collect_legs(request, calc.direction())
                .iter()
                .any(|leg| store.arrival_at(round, leg.stop).is_some());
            lifecycle.on_round_complete(round as u32, destination_reached);
        }

        for round in 0..=max_rounds {
            for leg in collect_legs(request, calc.direction()) {
                let Some(arrival) = store.arrival_at(round, leg.stop) else {
                    continue;
                };
                let outer_leg_time = match calc.direction() {
                    Direction::Forward => calc.add(arrival.arrival_time, leg.duration_seconds),
                    Direction::Reverse => {
                        calc.origin_departure_time(arrival.arrival_time, leg.duration_seconds, request.board_slack_seconds)
                    }
                };
                let legs = path::reconstruct(&store, arrival, outer_leg_time, calc.direction())?;
                let (departure_time, arrival_time, travel_duration) = path::summarize(&legs);
                let path = Path {
                    legs,
                    departure_time,
                    arrival_time,
                    num_transfers: (round as u32).saturating_sub(1),
                    travel_duration,
                    cost: arrival.cost + leg.cost,
                };
                let label = DestinationLabel {
                    time_rank: calc.rank(outer_leg_time),
                    round: round as u32,
                    cost: path.cost,
                    travel_duration: path.travel_duration,
                    fare_tag: arrival.fare_tag,
                    path,
                };
                das.try_insert(label, request.cost_relaxation_epsilon, request.allow_negative_transfer_allowance);
            }
        }

        lifecycle.on_iteration_complete();
    }

    diagnostics.rounds = max_rounds as u32;
    diagnostics.pareto_evictions = das.evictions();
    diagnostics.max_pareto_set_size = das.entries().len();

    let paths = das.entries().iter().map(|label| label.path.clone()).collect();
    Ok(Response {
        paths,
        partial: false,
        diagnostics,
    })
}
