//! Criterion benchmarks measure time of move generation and perft calculation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shashki::draughts::perft::perft;
use shashki::draughts::position::Position;

fn generate_moves(positions: &[Position]) {
    for position in positions {
        std::hint::black_box(position.generate_moves());
    }
}

fn movegen_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Move generation");
    let positions = include_str!("../tests/data/perft.txt")
        .lines()
        .map(|line| {
            let (encoding, _) = line.split_once(';').unwrap();
            Position::try_from(encoding).unwrap()
        })
        .collect::<Vec<_>>();
    group.throughput(criterion::Throughput::Elements(positions.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("movegen", format!("{} arbitrary positions", positions.len())),
        &positions,
        |b, positions| {
            b.iter(|| generate_moves(positions));
        },
    );
    group.finish();
}

criterion_group! {
    name = movegen;
    config = Criterion::default().sample_size(100);
    targets = movegen_bench
}

// This acts both as performance and correctness test.
fn perft_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    for (position, depth, nodes) in &[
        (Position::starting(), 5, 7_482),
        (Position::starting(), 6, 37_976),
        (
            Position::try_from(
                "b-b-b-b-/-b---b-b/w-b-----/-----b-b/--------/-w---w-w/w---w-w-/-w-w-w-w b 0",
            )
            .unwrap(),
            5,
            7_813,
        ),
        // Kings on the board.
        (
            Position::try_from(
                "b-b-b---/-b---b--/b-b-----/-------w/--b-w---/--------/w-------/-w---B-w b 0",
            )
            .unwrap(),
            5,
            5_757,
        ),
    ] {
        group.throughput(criterion::Throughput::Elements(*nodes));
        group.bench_with_input(
            BenchmarkId::new(
                "perft",
                format!("position {position}, depth {depth}, nodes {nodes}"),
            ),
            depth,
            |b, &depth| {
                b.iter(|| {
                    assert_eq!(perft(position, depth), *nodes);
                });
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = perft_group;
    config = Criterion::default().sample_size(10);
    targets = perft_bench
}

criterion_main!(movegen, perft_group);
