use clap::Parser;
use checkerbot::game::Controller;
use checkerbot::search::alphabeta::SearchParams;
use checkerbot::search::mcts::MctsParams;
use checkerbot::selfplay::{generate_games_with, write_records, SelfPlayParams};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "checkerbot-selfplay", about = "Play engine-vs-engine games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 100)]
    max_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 4)]
    random_plies: usize,
    /// White engine: 'm' mcts or 'a' alpha-beta
    #[arg(long, default_value = "m")]
    white: String,
    /// Black engine: 'm' mcts or 'a' alpha-beta
    #[arg(long, default_value = "a")]
    black: String,
    #[arg(long, default_value_t = 200)]
    movetime_ms: u64,
    #[arg(long, default_value_t = 0)]
    threads: usize,
    #[arg(long, default_value_t = 50)]
    rollout_plies: usize,
    #[arg(long, default_value_t = 4)]
    depth: u32,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn parse_engine(s: &str) -> anyhow::Result<Controller> {
    match s {
        "m" | "mcts" => Ok(Controller::Mcts),
        "a" | "ab" | "minimax" => Ok(Controller::Minimax),
        _ => anyhow::bail!("Invalid engine '{s}': use 'm' or 'a'"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        seed: a.seed,
        random_plies: a.random_plies,
        white: parse_engine(&a.white)?,
        black: parse_engine(&a.black)?,
        mcts: MctsParams {
            movetime: Duration::from_millis(a.movetime_ms),
            threads: a.threads,
            rollout_plies: a.rollout_plies,
            ..Default::default()
        },
        minimax: SearchParams { depth: a.depth, order_captures: true, threads: 1, ..Default::default() },
    };
    eprintln!("Generating {} games ({:?} vs {:?}, movetime={}ms, depth={})", a.games, params.white, params.black, a.movetime_ms, a.depth);
    let bar = ProgressBar::new(a.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let games = generate_games_with(&params, |g| {
        bar.set_message(format!("last: {} plies, result {}", g.plies, g.result));
        bar.inc(1);
    });
    bar.finish();
    let (w, d, b) = games.iter().fold((0, 0, 0), |(w, d, b), g| match g.result {
        1 => (w + 1, d, b),
        -1 => (w, d, b + 1),
        _ => (w, d + 1, b),
    });
    eprintln!("White {w}, draws {d}, Black {b}");
    write_records(&games, &a.out)?;
    eprintln!("Wrote {}", a.out.display());
    Ok(())
}
