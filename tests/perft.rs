use checkerbot::board::Position;
use checkerbot::perft::{divide, perft, perft_parallel};

#[test]
fn perft_startpos_small_depths() {
    let p = Position::startpos();
    assert_eq!(perft(&p, 0), 1);
    assert_eq!(perft(&p, 1), 7);
    assert_eq!(perft(&p, 2), 49);
    assert_eq!(perft(&p, 3), 302);
    assert_eq!(perft(&p, 4), 1469);
    assert_eq!(perft(&p, 5), 7361);
    assert_eq!(perft(&p, 6), 36768);
}

#[test]
fn parallel_perft_matches_serial() {
    let p = Position::startpos();
    for depth in 1..=5 {
        assert_eq!(perft_parallel(&p, depth), perft(&p, depth), "depth {depth}");
    }
}

#[test]
fn divide_sums_to_perft() {
    let p = Position::startpos();
    let split = divide(&p, 4);
    assert_eq!(split.len(), 7);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 1469);
}
