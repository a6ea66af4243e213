use anyhow::Result;
use checkerbot::board::check_to_mask;
use checkerbot::game::{Controller, Match, MatchConfig, Outcome};
use checkerbot::search::alphabeta::SearchParams;
use checkerbot::search::mcts::{Mcts, MctsParams};
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play draughts against the MCTS engine", long_about = None)]
struct Args {
    /// Who plays White: 'h' human, 'm' mcts, 'a' alpha-beta
    #[arg(long, default_value = "h")]
    white: String,

    /// Who plays Black: 'h' human, 'm' mcts, 'a' alpha-beta
    #[arg(long, default_value = "m")]
    black: String,

    /// MCTS thinking time per move in milliseconds
    #[arg(long, default_value_t = 1000)]
    movetime_ms: u64,

    /// Rollout worker threads (0 = all cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Ply cap for a single rollout
    #[arg(long, default_value_t = 50)]
    rollout_plies: usize,

    /// Alpha-beta search depth
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Plies after which the game is drawn
    #[arg(long, default_value_t = 100)]
    draw_plies: usize,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_controller(s: &str) -> Result<Controller> {
    match s.to_lowercase().as_str() {
        "h" | "human" => Ok(Controller::Human),
        "m" | "mcts" => Ok(Controller::Mcts),
        "a" | "ab" | "minimax" => Ok(Controller::Minimax),
        _ => anyhow::bail!("Invalid player: use 'h', 'm' or 'a'"),
    }
}

// Square numbers of the dark squares, top row first, as a reading aid.
fn print_square_numbers() {
    for row in (0..8).rev() {
        let line: Vec<String> = (0..8)
            .map(|col| {
                let check = row * 8 + col;
                if check_to_mask(check).is_ok() { format!("{check:>3}") } else { "  .".to_string() }
            })
            .collect();
        println!("{}", line.join(""));
    }
}

fn read_path() -> Result<Option<Vec<usize>>> {
    print!("Enter your move as squares (e.g. 9 18, or 9 27 45 for a double jump), 'quit' to exit: ");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    let input = input.trim();
    if input == "quit" {
        return Ok(None);
    }
    let path: Result<Vec<usize>, _> = input.split(|c: char| c.is_whitespace() || c == '-' || c == 'x')
        .filter(|t| !t.is_empty())
        .map(str::parse::<usize>)
        .collect();
    Ok(Some(path.unwrap_or_default()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MatchConfig {
        white: parse_controller(&args.white)?,
        black: parse_controller(&args.black)?,
        draw_plies: args.draw_plies,
        mcts: MctsParams {
            movetime: Duration::from_millis(args.movetime_ms),
            threads: args.threads,
            rollout_plies: args.rollout_plies,
            ..Default::default()
        },
        minimax: SearchParams { depth: args.depth, order_captures: true, threads: args.threads.max(1), ..Default::default() },
    };
    let mut game = Match::new(config);
    print_square_numbers();

    loop {
        let Some(side) = game.active_side() else {
            match game.outcome() {
                Some(Outcome::Win(winner)) => println!("\n{winner} wins!"),
                _ => println!("\nDraw at ply {}", game.plies()),
            }
            break;
        };

        println!("\n{side}'s turn (ply {})", game.plies());
        println!("{}", game.position());

        if !game.is_computer_turn() {
            let Some(path) = read_path()? else { break };
            match game.play_path(&path) {
                Ok(delta) => println!("You play: {delta}"),
                Err(e) => println!("Illegal move! ({e})"),
            }
            continue;
        }

        if args.verbose {
            println!("Thinking...");
        }
        if args.verbose && game.config().controller(side) == Controller::Mcts {
            let mut mcts = Mcts::new(*game.position());
            let res = mcts.run(&game.config().mcts);
            println!("{}", mcts.tree().statistics_string());
            println!("Iterations: {}, rollouts: {}, nodes: {}, elapsed: {:.2}s",
                res.iterations, res.rollouts, res.nodes, res.elapsed.as_secs_f32());
            match res.best {
                Some(next) => {
                    let delta = game.play(next)?;
                    println!("Computer plays: {delta}");
                }
                None => {
                    println!("No legal moves available!");
                    break;
                }
            }
            continue;
        }
        match game.step_computer()? {
            Some(delta) => println!("Computer plays: {delta}"),
            None => {
                println!("No legal moves available!");
                break;
            }
        }
    }

    Ok(())
}
