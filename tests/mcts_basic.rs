use checkerbot::board::{Position, Side};
use checkerbot::search::mcts::{search, Mcts, MctsParams};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

fn capped(iterations: u64, threads: usize) -> MctsParams {
    MctsParams {
        movetime: Duration::from_secs(120),
        max_iterations: Some(iterations),
        threads,
        ..Default::default()
    }
}

// White: man on 25, queen on 36. Black: men on 9 and 41. Only 25-34 wins by force.
fn forced_win() -> Position {
    Position::new(0x0004_1000, 0x0010_0010, 0x0004_0000, Side::White).unwrap()
}

#[test]
fn no_moves_means_no_answer() {
    let stuck = Position::new(1, (1 << 4) | (1 << 9), 0, Side::White).unwrap();
    assert_eq!(search(&stuck, &capped(10, 1)), None);
    let wiped = Position::new(0, 1 << 20, 0, Side::White).unwrap();
    let res = Mcts::new(wiped).run(&capped(10, 1));
    assert_eq!(res.best, None);
    assert_eq!(res.iterations, 0);
}

#[test]
fn answer_is_a_legal_successor() {
    let p = Position::startpos();
    let best = search(&p, &capped(50, 2)).expect("startpos has moves");
    assert!(p.moves().any(|c| c == best));
    assert_eq!(best.side_to_move(), Side::Black);
}

#[test]
fn finds_the_only_winning_move() {
    let p = forced_win();
    let res = Mcts::new(p).run(&capped(500, 0));
    let best = res.best.expect("position has moves");
    assert_eq!(best.white(), 0x0006_0000);
    assert_eq!(best.black(), p.black());
    assert_eq!(best.queen(), 0x0004_0000);
    assert_eq!(res.iterations, 500);
}

#[test]
fn worker_count_does_not_change_the_result() {
    let p = forced_win();
    let mut inline = Mcts::new(p);
    let mut pooled = Mcts::new(p);
    let a = inline.run(&capped(200, 1));
    let b = pooled.run(&capped(200, 4));
    assert_eq!(a.best, b.best);
    assert_eq!(a.rollouts, b.rollouts);
    assert_eq!(a.nodes, b.nodes);
    assert_eq!(inline.tree().root().visits(), pooled.tree().root().visits());
}

#[test]
fn root_visits_count_every_rollout() {
    let mut mcts = Mcts::new(Position::startpos());
    let res = mcts.run(&capped(40, 1));
    let root = mcts.tree().root();
    assert_eq!(root.visits() as u64, res.rollouts);
    let child_visits: u32 = root.children().iter().map(|&c| mcts.tree().node(c).visits()).sum();
    assert_eq!(child_visits, root.visits());
    assert_eq!(res.nodes, mcts.tree().len());
}

#[test]
fn stop_flag_ends_the_episode() {
    let stop = Arc::new(AtomicBool::new(true));
    let params = MctsParams { stop: Some(stop), ..capped(1000, 1) };
    let p = Position::startpos();
    let res = Mcts::new(p).run(&params);
    assert_eq!(res.iterations, 0);
    // children exist before the first batch, so an answer is still given
    let best = res.best.expect("root children were expanded");
    assert!(p.moves().any(|c| c == best));
}

#[test]
fn movetime_bounds_the_episode() {
    let params = MctsParams { movetime: Duration::from_millis(100), threads: 1, ..Default::default() };
    let res = Mcts::new(Position::startpos()).run(&params);
    assert!(res.best.is_some());
    assert!(res.elapsed < Duration::from_secs(5), "ran for {:?}", res.elapsed);
}

#[test]
fn statistics_list_root_moves() {
    let mut mcts = Mcts::new(Position::startpos());
    mcts.run(&capped(20, 1));
    let stats = mcts.tree().statistics_string();
    // header plus one row per opening move
    assert_eq!(stats.lines().count(), 8);
    assert!(stats.contains("16-25"));
}
