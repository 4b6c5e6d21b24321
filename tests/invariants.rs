//! Cross-cutting invariants a correct response must satisfy regardless of
//! which network or profile produced it.

use access_raptor::model::Leg;
use access_raptor::{search, Profile, Request};
use fixtures::{chain_network, one_transfer_network};

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

/// Every leg in a reconstructed path must not arrive before it departs, and
/// consecutive legs must hand off at a consistent time: one leg's arrival is
/// the next leg's departure.
#[test]
fn path_legs_are_chronologically_consistent() {
    let provider = chain_network(5, 8, 90, 150, 30);
    let request = Request::builder()
        .departure_at(0)
        .window(400)
        .iteration_step(90)
        .max_transfers(5)
        .access(access_leg(0))
        .egress(egress_leg(4))
        .build();

    let response = search(&provider, &request).unwrap();
    for path in &response.paths {
        assert!(path.arrival_time >= path.departure_time);
        for window in path.legs.windows(2) {
            assert_eq!(window[0].arrival_time(), window[1].departure_time());
        }
        assert!(path.legs.first().unwrap().departure_time() >= path.departure_time);
    }
}

/// `num_transfers` must never exceed the request's budget.
#[test]
fn num_transfers_never_exceeds_the_requested_budget() {
    let provider = chain_network(6, 6, 100, 150, 20);
    let max_transfers = 2;
    let request = Request::builder()
        .departure_at(0)
        .window(300)
        .iteration_step(100)
        .max_transfers(max_transfers)
        .access(access_leg(0))
        .egress(egress_leg(5))
        .build();

    let response = search(&provider, &request).unwrap();
    for path in &response.paths {
        assert!(path.num_transfers <= max_transfers);
    }
}

/// A request whose egress stop is never reachable returns an empty, non-partial
/// response rather than an error (spec §7: unreachable destinations are not a
/// failure).
#[test]
fn unreachable_destination_is_not_an_error() {
    let mut builder = fixtures::builder(4);
    builder
        .add_pattern(
            vec![0, 1],
            vec![access_raptor::model::TripSchedule {
                arrival: vec![0, 60],
                departure: vec![0, 60],
            }],
        )
        .unwrap();
    let provider = builder.build();

    let request = Request::builder()
        .departure_at(0)
        .window(0)
        .access(access_leg(0))
        .egress(egress_leg(3))
        .build();

    let response = search(&provider, &request).unwrap();
    assert!(response.paths.is_empty());
    assert!(!response.partial);
}

/// The same network and request, run under both profiles, must agree on
/// whether the destination is reachable at all.
#[test]
fn both_profiles_agree_on_reachability() {
    let (provider, from, to) = one_transfer_network();

    let best_times_request = Request::builder()
        .departure_at(0)
        .window(0)
        .board_slack(60)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();
    let mc_request = Request::builder()
        .departure_at(0)
        .window(0)
        .board_slack(60)
        .profile(Profile::MultiCriteria)
        .access(access_leg(from))
        .egress(egress_leg(to))
        .build();

    let best_times = search(&provider, &best_times_request).unwrap();
    let multi_criteria = search(&provider, &mc_request).unwrap();
    assert_eq!(best_times.paths.is_empty(), multi_criteria.paths.is_empty());
}
