use checkerbot::game::Controller;
use checkerbot::search::alphabeta::SearchParams;
use checkerbot::selfplay::{generate_games, generate_games_with, read_records, write_records, SelfPlayParams};
use pretty_assertions::assert_eq;

fn minimax_params(games: usize, seed: u64) -> SelfPlayParams {
    SelfPlayParams {
        games,
        max_plies: 20,
        seed,
        random_plies: 2,
        white: Controller::Minimax,
        black: Controller::Minimax,
        minimax: SearchParams { depth: 2, order_captures: true, threads: 1, ..Default::default() },
        ..Default::default()
    }
}

#[test]
fn same_seed_same_games() {
    let a = generate_games(&minimax_params(3, 7));
    let b = generate_games(&minimax_params(3, 7));
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    for g in &a {
        assert_eq!(g.moves.len(), g.plies);
        assert!(g.plies <= 21);
        assert!((-1..=1).contains(&g.result));
    }
}

#[test]
fn callback_sees_every_game() {
    let mut seen = 0;
    let games = generate_games_with(&minimax_params(2, 1), |_| seen += 1);
    assert_eq!(seen, games.len());
}

#[test]
fn human_side_leaves_game_unfinished() {
    let params = SelfPlayParams { white: Controller::Human, random_plies: 0, ..minimax_params(1, 3) };
    let games = generate_games(&params);
    assert_eq!(games[0].plies, 0);
    assert_eq!(games[0].result, 0);
}

#[test]
fn jsonl_round_trip() {
    let games = generate_games(&minimax_params(2, 11));
    let path = std::path::Path::new("target/selfplay_test/games.jsonl");
    write_records(&games, path).unwrap();
    let back = read_records(path).unwrap();
    assert_eq!(back, games);
    std::fs::remove_file(path).unwrap();
}
