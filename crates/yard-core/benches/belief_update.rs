use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::fmt::Write;
use std::sync::Arc;
use yard_core::belief::BeliefEngine;
use yard_core::graph::TransportGraph;
use yard_core::model::mode::TravelMode;
use yard_core::model::node::Node;
use yard_core::model::reveal::RevealSchedule;

const WIDTH: u16 = 20;
const HEIGHT: u16 = 10;

/// Grid city: taxi between orthogonal neighbors, bus along every third row,
/// underground along every fifth column.
fn grid_layout() -> String {
    let id = |x: u16, y: u16| y * WIDTH + x + 1;
    let mut text = format!("{}\n", WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if x + 1 < WIDTH {
                let _ = writeln!(text, "TAXI; {} : : {}", id(x, y), id(x + 1, y));
            }
            if y + 1 < HEIGHT {
                let _ = writeln!(text, "TAXI; {} : : {}", id(x, y), id(x, y + 1));
            }
            if y % 3 == 0 && x + 2 < WIDTH && x % 2 == 0 {
                let _ = writeln!(
                    text,
                    "BUS; {} : {} : {}",
                    id(x, y),
                    id(x + 1, y),
                    id(x + 2, y)
                );
            }
            if x % 5 == 0 && y + 3 < HEIGHT && y % 3 == 0 {
                let _ = writeln!(text, "UNDERGROUND; {} : : {}", id(x, y), id(x, y + 3));
            }
        }
    }
    text
}

fn bench_belief_updates(c: &mut Criterion) {
    let graph = Arc::new(TransportGraph::parse(&grid_layout()).expect("grid parses"));
    let seekers: Vec<Node> = [13, 47, 88, 121, 166]
        .into_iter()
        .filter_map(Node::new)
        .collect();
    let modes = [
        TravelMode::Taxi,
        TravelMode::Black,
        TravelMode::Bus,
        TravelMode::Taxi,
        TravelMode::Underground,
        TravelMode::Black,
    ];

    let mut group = c.benchmark_group("belief_update");
    group.bench_function("uniform_prior_six_moves", |b| {
        b.iter_batched(
            || {
                BeliefEngine::new(
                    Arc::clone(&graph),
                    RevealSchedule::default(),
                    graph.stations().keys().copied(),
                )
            },
            |mut engine| {
                for mode in modes {
                    if engine.update(mode, None, &seekers).is_err() {
                        engine.reset_uniform();
                    }
                }
                black_box(engine.most_likely_nodes());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_belief_updates);
criterion_main!(benches);
