use criterion::{criterion_group, criterion_main, Criterion, black_box};
use checkerbot::board::Position;
use checkerbot::perft::{perft, perft_parallel};
use checkerbot::search::eval::evaluate;

fn bench_movegen(c: &mut Criterion) {
    let p = Position::startpos();
    c.bench_function("perft_5_startpos", |ben| {
        ben.iter(|| black_box(perft(black_box(&p), 5)))
    });
    c.bench_function("perft_parallel_7_startpos", |ben| {
        ben.iter(|| black_box(perft_parallel(black_box(&p), 7)))
    });

    // a spread of midgame positions for the generator and the evaluator
    let mut positions = vec![p];
    for _ in 0..4 {
        positions = positions.iter().flat_map(|q| q.moves()).collect();
    }
    c.bench_function("generate_moves_depth4_frontier", |ben| {
        ben.iter(|| {
            let mut n = 0usize;
            for q in &positions { n += q.moves().count(); }
            black_box(n)
        })
    });
    c.bench_function("evaluate_depth4_frontier", |ben| {
        ben.iter(|| {
            let mut s = 0i32;
            for q in &positions { s = s.wrapping_add(evaluate(q, q.side_to_move())); }
            black_box(s)
        })
    });
}

criterion_group!(benches, bench_movegen);
criterion_main!(benches);
