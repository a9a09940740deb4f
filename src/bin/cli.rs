//! Development driver: perft runs and CPU self-play from the command line.
//!
//!     gambit perft <depth> [fen]
//!     gambit divide <depth> [fen]
//!     gambit selfplay [--depth N] [--ms N] [fen]

use gambit::board::Position;
use gambit::engine::Engine;
use gambit::logger::init_stderr_logging;
use gambit::moves::perft::{perft, perft_divide};
use gambit::moves::tables::attack_tables;
use gambit::player::{CancelToken, CpuConfig, CpuPlayer, Difficulty, MoveOutcome};
use gambit::status::GameStatus;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn usage() -> ! {
    eprintln!("usage:");
    eprintln!("  gambit perft <depth> [fen]");
    eprintln!("  gambit divide <depth> [fen]");
    eprintln!("  gambit selfplay [--depth N] [--ms N] [fen]");
    std::process::exit(2);
}

fn parse_position(fen: Option<&str>) -> Position {
    let fen = fen.unwrap_or(START_FEN);
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("bad FEN: {err}");
            std::process::exit(2);
        }
    }
}

fn run_perft(depth: u32, fen: Option<&str>) {
    let mut pos = parse_position(fen);
    let tables = attack_tables();
    let start = Instant::now();
    let nodes = perft(&mut pos, tables, depth);
    let secs = start.elapsed().as_secs_f64().max(1e-9);
    println!(
        "perft({depth}) = {nodes}  [{:.3}s, {:.0} nps]",
        secs,
        nodes as f64 / secs
    );
}

fn run_divide(depth: u32, fen: Option<&str>) {
    let mut pos = parse_position(fen);
    let tables = attack_tables();
    let (rows, total) = perft_divide(&mut pos, tables, depth);
    for (mv, nodes) in rows {
        println!("{}: {nodes}", mv.to_uci());
    }
    println!("total: {total}");
}

fn run_selfplay(depth: u32, budget_ms: Option<u64>, fen: Option<&str>) {
    let engine = match fen {
        Some(f) => Engine::from_fen(f).unwrap_or_else(|err| {
            eprintln!("bad FEN: {err}");
            std::process::exit(2);
        }),
        None => Engine::new_initial(),
    };
    let engine = Arc::new(Mutex::new(engine));
    let mut cpu = CpuPlayer::new(Arc::clone(&engine));
    let config = CpuConfig {
        difficulty: Difficulty::Hard,
        max_depth: depth,
        randomize: true,
        thinking_budget: budget_ms.map(Duration::from_millis),
    };

    loop {
        {
            let mut engine = engine.lock();
            let status = engine.status();
            if status != GameStatus::InPlay {
                println!("result: {status:?}");
                println!("final: {}", engine.to_fen());
                return;
            }
        }

        let pending = cpu.calculate_async(config.clone(), CancelToken::new());
        match pending.wait() {
            MoveOutcome::Chosen(mv) => {
                let mut engine = engine.lock();
                let number = engine.position().fullmove_number();
                let side = engine.side_to_move();
                engine.make(mv).expect("CPU move is legal");
                println!("{number:>3}. {side:?} {}", mv.to_uci());
            }
            MoveOutcome::NoLegalMoves => return,
            MoveOutcome::Cancelled => return,
        }
    }
}

fn main() {
    init_stderr_logging("info");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut args = args.iter().map(String::as_str);

    match args.next() {
        Some("perft") => {
            let depth = args.next().and_then(|d| d.parse().ok()).unwrap_or_else(|| usage());
            run_perft(depth, args.next());
        }
        Some("divide") => {
            let depth = args.next().and_then(|d| d.parse().ok()).unwrap_or_else(|| usage());
            run_divide(depth, args.next());
        }
        Some("selfplay") => {
            let mut depth = 6u32;
            let mut budget_ms = None;
            let mut fen = None;
            while let Some(arg) = args.next() {
                match arg {
                    "--depth" => {
                        depth = args.next().and_then(|v| v.parse().ok()).unwrap_or_else(|| usage())
                    }
                    "--ms" => {
                        budget_ms =
                            Some(args.next().and_then(|v| v.parse().ok()).unwrap_or_else(|| usage()))
                    }
                    other => fen = Some(other),
                }
            }
            run_selfplay(depth, budget_ms, fen);
        }
        _ => usage(),
    }
}
