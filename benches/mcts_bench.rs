use criterion::{black_box, criterion_group, criterion_main, Criterion};
use checkerbot::board::Position;
use checkerbot::search::mcts::{Mcts, MctsParams};
use std::time::Duration;

fn params(iterations: u64, threads: usize) -> MctsParams {
    MctsParams {
        movetime: Duration::from_secs(60),
        max_iterations: Some(iterations),
        threads,
        ..Default::default()
    }
}

fn benchmark_mcts(c: &mut Criterion) {
    let board = Position::startpos();

    let mut group = c.benchmark_group("mcts_100_iterations");
    for &threads in &[1usize, 2, 4] {
        group.bench_function(format!("threads_{threads}"), |b| {
            b.iter(|| {
                let mut mcts = Mcts::new(black_box(board));
                black_box(mcts.run(&params(100, threads)).rollouts)
            })
        });
    }
    group.finish();

    c.bench_function("mcts_single_batch", |b| {
        b.iter(|| {
            let mut mcts = Mcts::new(black_box(board));
            black_box(mcts.run(&params(1, 1)).nodes)
        })
    });
}

criterion_group!(benches, benchmark_mcts);
criterion_main!(benches);
