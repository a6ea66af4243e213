use crate::board::{Position, Side};
use crate::game::{Controller, Match, MatchConfig, Outcome};
use crate::search::alphabeta::SearchParams;
use crate::search::mcts::MctsParams;
use anyhow::Context;
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub seed: u64,
    pub random_plies: usize, // uniformly random opening plies before the engines take over
    pub white: Controller,
    pub black: Controller,
    pub mcts: MctsParams,
    pub minimax: SearchParams,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        let base = MatchConfig::default();
        Self {
            games: 10,
            max_plies: base.draw_plies,
            seed: 42,
            random_plies: 4,
            white: Controller::Mcts,
            black: Controller::Minimax,
            mcts: base.mcts,
            minimax: base.minimax,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub result: i8, // 1 white win, 0 draw or unfinished, -1 black win
    pub plies: usize,
}

fn result_code(outcome: Option<Outcome>) -> i8 {
    match outcome {
        Some(Outcome::Win(Side::White)) => 1,
        Some(Outcome::Win(Side::Black)) => -1,
        _ => 0,
    }
}

fn select_random_move(moves: &[Position], rng: &mut SmallRng) -> Option<Position> {
    if moves.is_empty() { None } else { Some(moves[rng.gen_range(0..moves.len())]) }
}

pub fn play_game(params: &SelfPlayParams, rng: &mut SmallRng) -> GameRecord {
    let config = MatchConfig {
        white: params.white,
        black: params.black,
        draw_plies: params.max_plies,
        mcts: params.mcts.clone(),
        minimax: params.minimax.clone(),
    };
    let mut game = Match::new(config);
    let mut record = GameRecord { moves: Vec::new(), result: 0, plies: 0 };
    while game.active_side().is_some() {
        let next = if game.plies() < params.random_plies {
            select_random_move(game.legal_moves(), rng)
        } else {
            game.computer_move()
        };
        // a human side cannot be driven here; leave the game unfinished
        let Some(next) = next else { break };
        match game.play(next) {
            Ok(delta) => record.moves.push(delta.to_string()),
            Err(_) => break,
        }
    }
    record.plies = game.plies();
    record.result = result_code(game.outcome());
    record
}

pub fn generate_games(params: &SelfPlayParams) -> Vec<GameRecord> {
    generate_games_with(params, |_| {})
}

/// Like `generate_games`, calling `on_game` after each finished game.
pub fn generate_games_with(params: &SelfPlayParams, mut on_game: impl FnMut(&GameRecord)) -> Vec<GameRecord> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let record = play_game(params, &mut rng);
        info!("game {}: {} plies, result {}", gi + 1, record.plies, record.result);
        on_game(&record);
        games.push(record);
    }
    games
}

/// Write games as JSON lines.
pub fn write_records<P: AsRef<Path>>(games: &[GameRecord], path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let mut w = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_records<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<GameRecord>> {
    let path = path.as_ref();
    let f = BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let mut out = Vec::new();
    for (n, line) in f.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec = serde_json::from_str(&line).with_context(|| format!("{}:{}", path.display(), n + 1))?;
        out.push(rec);
    }
    Ok(out)
}
