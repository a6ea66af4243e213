use checkerbot::board::{generate_moves, Position, Side};
use std::collections::HashSet;

fn men(p: &Position, side: Side) -> u32 {
    p.pieces(side) & !p.queen()
}

// Every position reachable from the start within `depth` plies.
fn reachable(depth: u32) -> Vec<Position> {
    let mut seen = HashSet::new();
    let mut frontier = vec![Position::startpos()];
    seen.insert(Position::startpos());
    for _ in 0..depth {
        let mut next = Vec::new();
        for p in &frontier {
            for c in p.moves() {
                if seen.insert(c) {
                    next.push(c);
                }
            }
        }
        frontier = next;
    }
    seen.into_iter().collect()
}

#[test]
fn successors_keep_board_invariants() {
    for p in reachable(6) {
        let mover = p.side_to_move();
        for c in generate_moves(&p) {
            assert_eq!(c.white() & c.black(), 0, "overlap after move from\n{p}");
            assert_eq!(c.queen() & !c.occupied(), 0, "orphan queen after move from\n{p}");
            assert!(!c.is_continuation(), "successor left mid-chain");
            assert_eq!(c.side_to_move(), !mover, "turn must pass exactly once");
            assert_eq!(c.pieces(mover).count_ones(), p.pieces(mover).count_ones());
            assert!(c.pieces(!mover).count_ones() <= p.pieces(!mover).count_ones());
            // the opponent's pieces never move
            assert_eq!(c.pieces(!mover) & !p.pieces(!mover), 0);
            // a man on its crown row is always crowned
            assert_eq!(men(&c, Side::White) & Side::White.crown_row(), 0);
            assert_eq!(men(&c, Side::Black) & Side::Black.crown_row(), 0);
        }
    }
}

#[test]
fn captures_are_forced_everywhere() {
    for p in reachable(7) {
        let opp = !p.side_to_move();
        let before = p.pieces(opp).count_ones();
        let takes: Vec<bool> = p.moves().map(|c| c.pieces(opp).count_ones() < before).collect();
        if takes.iter().any(|&t| t) {
            assert!(takes.iter().all(|&t| t), "quiet move offered next to a capture in\n{p}");
        }
    }
}

#[test]
fn generate_moves_matches_iterator_order() {
    let p = Position::startpos();
    let listed = generate_moves(&p);
    let iterated: Vec<Position> = p.moves().collect();
    assert_eq!(listed, iterated);
}

#[test]
fn black_has_seven_openings_too() {
    let p = Position::new(0x0000_0FFF, 0xFFF0_0000, 0, Side::Black).unwrap();
    assert_eq!(p.moves().count(), 7);
    for c in p.moves() {
        assert_eq!(c.side_to_move(), Side::White);
        assert_eq!(c.white(), 0x0000_0FFF);
    }
}

#[test]
fn double_jump_resolves_in_one_turn() {
    // White man on square 0, Black men on 9 and 25
    let p = Position::new(1, (1 << 4) | (1 << 12), 0, Side::White).unwrap();
    let moves = generate_moves(&p);
    assert_eq!(moves.len(), 1);
    let c = moves[0];
    assert_eq!(c.black(), 0);
    assert_eq!(c.white(), 1 << 16);
    assert_eq!(c.side_to_move(), Side::Black);
    assert_eq!(c.winner(), Some(Side::White));
}

#[test]
fn quiet_men_lose_their_moves_to_a_capture() {
    let with_capture = Position::new(1 | (1 << 3), (1 << 4) | (1 << 12), 0, Side::White).unwrap();
    let moves = generate_moves(&with_capture);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].white(), (1 << 3) | (1 << 16));

    let without = Position::new(1 << 3, (1 << 4) | (1 << 12), 0, Side::White).unwrap();
    assert_eq!(generate_moves(&without).len(), 2);
}

#[test]
fn crowning_capture_ends_the_turn() {
    // the new queen could take again from 59, but the turn is over
    let p = Position::new(1 << 20, (1 << 25) | (1 << 26), 0, Side::White).unwrap();
    let moves = generate_moves(&p);
    assert_eq!(moves.len(), 1);
    let c = moves[0];
    assert_eq!(c.white(), 1 << 29);
    assert_eq!(c.queen(), 1 << 29);
    assert_eq!(c.black(), 1 << 26);
    assert_eq!(c.side_to_move(), Side::Black);
}

#[test]
fn queens_move_both_ways() {
    let queen = Position::new(1 << 13, 1 << 31, 1 << 13, Side::White).unwrap();
    let man = Position::new(1 << 13, 1 << 31, 0, Side::White).unwrap();
    assert_eq!(queen.moves().count(), 4);
    assert_eq!(man.moves().count(), 2);
    for c in queen.moves() {
        assert_eq!(c.queen(), c.white(), "queen status follows the piece");
    }
}

#[test]
fn stuck_side_has_no_successors_and_loses() {
    // White man on 0 boxed in by Black men on 9 and 18
    let p = Position::new(1, (1 << 4) | (1 << 9), 0, Side::White).unwrap();
    assert_eq!(p.moves().count(), 0);
    assert_eq!(p.winner(), Some(Side::Black));
}
