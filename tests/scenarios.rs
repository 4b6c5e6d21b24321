//! End-to-end scenarios against synthetic networks, exercising the public
//! `search` entry point the way a caller would. Each scenario pins down a
//! specific piece of behavior rather than asserting a golden path wholesale.

use access_raptor::model::{Leg, Transfer};
use access_raptor::{search, Direction, ErrorCategory, Profile, Request};
use fixtures::{
    chain_network, exact_threshold_transfer_network, one_transfer_network, single_trip_network,
    six_trip_headway_network,
};

fn access_leg(stop: u32) -> Leg {
    Leg {
        stop,
        duration_seconds: 0,
        cost: 0.0,
    }
}

fn egress_leg(stop: u32) -> Leg {
    Leg {
        stop,
        duration_seconds: 0,
        cost: 0.0,
    }
}

/// Scenario A: a single direct trip with no transfers needed.
#[test]
fn scenario_a_direct_trip() {
    let (provider, from, to) = single_trip_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.paths.len(), 1);
    let path = &response.paths[0];
    assert_eq!(path.num_transfers, 0);
    assert_eq!(path.departure_time, 0);
    assert_eq!(path.arrival_time, 240);
}

/// Scenario B: one transfer is required to connect two patterns.
#[test]
fn scenario_b_one_transfer() {
    let (provider, from, to) = one_transfer_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .board_slack(0)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.paths.len(), 1);
    let path = &response.paths[0];
    assert_eq!(path.num_transfers, 1);
    assert_eq!(path.arrival_time, 300);
}

/// Scenario C: the connecting trip departs at exactly
/// `arrival_time + board_slack`. Boardability at the threshold is
/// non-strict, so the transfer still succeeds.
#[test]
fn scenario_c_exact_threshold_is_boardable() {
    let (provider, from, to) = exact_threshold_transfer_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .board_slack(60)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.paths.len(), 1);
    assert_eq!(response.paths[0].arrival_time, 300);
}

/// Scenario D: raising the board slack past the threshold makes the
/// connection miss the boarded trip's departure, so no trip is boardable
/// and the connecting leg is pushed out to... there is no later trip, so
/// the destination is unreachable within the window.
#[test]
fn scenario_d_slack_past_departure_misses_the_trip() {
    let (provider, from, to) = exact_threshold_transfer_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .board_slack(61)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert!(response.paths.is_empty());
}

/// Scenario E: range-RAPTOR over a departure window should surface distinct
/// trips at different iteration minutes, not just the one found at minute 0.
#[test]
fn scenario_e_range_window_finds_multiple_departures() {
    let (provider, from, to) = six_trip_headway_network();
    let request = Request::builder()
        .departure_at(0)
        .window(300)
        .iteration_step(60)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert!(!response.paths.is_empty());
    for path in &response.paths {
        assert_eq!(path.arrival_time - path.departure_time, 240);
    }
}

/// Scenario F: a longer chain with transfers should be reachable end to end
/// within a sufficiently generous transfer budget.
#[test]
fn scenario_f_chain_reaches_the_far_end() {
    let provider = chain_network(6, 10, 90, 200, 30);
    let request = Request::builder()
        .departure_at(0)
        .window(600)
        .iteration_step(90)
        .max_transfers(6)
        .access(access_leg(0))
        .egress(egress_leg(5))
        .build();

    let response = search(&provider, &request).unwrap();
    assert!(!response.paths.is_empty());
    for path in &response.paths {
        assert!(path.arrival_time > path.departure_time);
    }
}

#[test]
fn empty_access_list_never_finds_a_path() {
    let (provider, _from, to) = single_trip_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert!(response.paths.is_empty());
}

#[test]
fn zero_window_still_runs_exactly_one_iteration() {
    let (provider, from, to) = single_trip_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.diagnostics.iterations, 1);
}

#[test]
fn max_transfers_zero_rejects_journeys_needing_a_transfer() {
    let (provider, from, to) = one_transfer_network();
    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .max_transfers(0)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert!(response.paths.is_empty());
}

#[test]
fn out_of_range_egress_stop_is_rejected_before_search_runs() {
    let (provider, from, _to) = single_trip_network();
    let request = Request::builder()
        .departure_at(0)
        .access(access_leg(from))
        .egress(egress_leg(99))
        .build();

    let err = search(&provider, &request).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidInput);
}

/// Scenario E (reverse): an arrive-by query with deadline 240 over the same
/// network as scenario A seeds from the egress side and collects at the
/// access side, and should find the exact mirror of scenario A's direct
/// trip: depart at 0, arrive by 240, no transfers.
#[test]
fn reverse_direction_search_finds_the_mirrored_direct_trip() {
    let (provider, from, to) = single_trip_network();
    let request = Request::builder()
        .departure_at(240)
        .window(0)
        .direction(Direction::Reverse)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.paths.len(), 1);
    let path = &response.paths[0];
    assert_eq!(path.num_transfers, 0);
    assert_eq!(path.departure_time, 0);
    assert_eq!(path.arrival_time, 240);
}

/// The same arrive-by query, but through a connection that needs one
/// transfer: the mirror of scenario B.
#[test]
fn reverse_direction_search_finds_the_mirrored_transfer_trip() {
    let (provider, from, to) = one_transfer_network();
    let request = Request::builder()
        .departure_at(300)
        .window(0)
        .board_slack(0)
        .direction(Direction::Reverse)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.paths.len(), 1);
    let path = &response.paths[0];
    assert_eq!(path.num_transfers, 1);
    assert_eq!(path.departure_time, 0);
    assert_eq!(path.arrival_time, 300);
}

/// One route reaches the destination in a single ride but arrives late; a
/// second route needs an extra transfer but arrives much earlier. Neither
/// dominates the other (better round vs. better arrival time), so the
/// multi-criteria profile should keep both.
#[test]
fn multi_criteria_profile_keeps_a_fewer_transfers_alternative() {
    let mut builder = fixtures::builder(3);
    builder
        .add_pattern(
            vec![0, 1],
            vec![access_raptor::model::TripSchedule {
                arrival: vec![0, 50],
                departure: vec![0, 50],
            }],
        )
        .unwrap();
    builder
        .add_pattern(
            vec![1, 2],
            vec![access_raptor::model::TripSchedule {
                arrival: vec![60, 100],
                departure: vec![60, 100],
            }],
        )
        .unwrap();
    builder.add_transfer(Transfer {
        from_stop: 1,
        to_stop: 2,
        duration_seconds: 500,
        cost: 0.0,
    });
    let provider = builder.build();

    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .max_transfers(2)
        .profile(Profile::MultiCriteria)
        .cost_relaxation_epsilon(0.0)
        .access(access_leg(0))
        .egress(egress_leg(2))
        .build();

    let response = search(&provider, &request).unwrap();
    assert_eq!(response.paths.len(), 2);
    let mut arrivals: Vec<i64> = response.paths.iter().map(|p| p.arrival_time).collect();
    arrivals.sort();
    assert_eq!(arrivals, vec![100, 550]);
}
