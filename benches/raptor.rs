use std::hint::black_box;

use access_raptor::model::Leg;
use access_raptor::{search, Direction, Request};
use criterion::{criterion_group, criterion_main, Criterion};
use fixtures::chain_network;

fn best_times_benchmark(c: &mut Criterion) {
    let provider = chain_network(50, 40, 120, 300, 90);
    let request = Request::builder()
        .departure_at(0)
        .window(1800)
        .iteration_step(60)
        .max_transfers(6)
        .access(Leg {
            stop: 0,
            duration_seconds: 0,
            cost: 0.0,
        })
        .egress(Leg {
            stop: 49,
            duration_seconds: 0,
            cost: 0.0,
        })
        .build();

    c.bench_function("best_times_range_raptor", |b| {
        b.iter(|| search(black_box(&provider), black_box(&request)))
    });
}

fn reverse_direction_benchmark(c: &mut Criterion) {
    let provider = chain_network(50, 40, 120, 300, 90);
    let request = Request::builder()
        .departure_at(6000)
        .window(1800)
        .iteration_step(60)
        .max_transfers(6)
        .direction(Direction::Reverse)
        .access(Leg {
            stop: 0,
            duration_seconds: 0,
            cost: 0.0,
        })
        .egress(Leg {
            stop: 49,
            duration_seconds: 0,
            cost: 0.0,
        })
        .build();

    c.bench_function("best_times_range_raptor_reverse", |b| {
        b.iter(|| search(black_box(&provider), black_box(&request)))
    });
}

criterion_group!(benches, best_times_benchmark, reverse_direction_benchmark);
criterion_main!(benches);
