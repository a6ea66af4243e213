use checkerbot::board::{MoveDelta, Position, Side};
use checkerbot::perft::{divide, perft};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for CheckerBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// White pieces as a hex mask (default: start position)
    #[arg(long, value_parser = parse_mask)]
    white: Option<u32>,
    /// Black pieces as a hex mask
    #[arg(long, value_parser = parse_mask)]
    black: Option<u32>,
    /// Crowned pieces as a hex mask
    #[arg(long, value_parser = parse_mask, default_value = "0")]
    queen: u32,
    /// Black to move
    #[arg(long, default_value_t = false)]
    black_to_move: bool,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print leaf counts per root move
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn parse_mask(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("bad mask {s}: {e}"))
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let base = match (args.white, args.black) {
        (None, None) => Position::startpos(),
        (w, b) => {
            let side = if args.black_to_move { Side::Black } else { Side::White };
            Position::new(w.unwrap_or(0), b.unwrap_or(0), args.queen, side)?
        }
    };
    println!("{base}");

    if args.divide {
        for (next, n) in divide(&base, args.depth) {
            println!("{}: {}", MoveDelta::between(&base, &next), n);
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let t0 = Instant::now();
    let nodes = pool.install(|| {
        if args.threads <= 1 || args.depth <= 1 {
            perft(&base, args.depth)
        } else {
            let roots: Vec<Position> = base.moves().collect();
            roots.par_iter().map(|p| perft(p, args.depth - 1)).sum()
        }
    });
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
    Ok(())
}
