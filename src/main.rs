//! Console self-play harness
//!
//! Drives two engines against each other through the public interface a
//! match host would use: one-time configuration, one `select_move` per
//! turn, and a mark applied by the harness.

use clap::Parser;
use log::info;

use connectk::{Board, Engine, EngineConfig, GameState};

#[derive(Debug, Parser)]
#[command(name = "connectk", about = "Self-play a generalized Connect-Four match")]
struct Args {
    /// Board rows
    #[arg(long, default_value_t = 6)]
    rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 7)]
    cols: usize,

    /// Discs in a row needed to win
    #[arg(long, default_value_t = 4)]
    win_len: usize,

    /// Per-turn time budget in seconds
    #[arg(long, default_value_t = 5)]
    budget_secs: u64,

    /// RNG seed for the timeout fallback
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut board = Board::new(args.rows, args.cols, args.win_len);
    let mut engines = [make_engine(&args, true), make_engine(&args, false)];

    println!(
        "{} self-play on {}x{}, {} in a row to win, {}s per turn\n",
        engines[0].player_name(),
        args.rows,
        args.cols,
        args.win_len,
        args.budget_secs
    );

    let mut turn = 0usize;
    while board.game_state() == GameState::Open {
        let side = board.to_move();
        let engine = &mut engines[turn % 2];
        let Some(report) = engine.select_move_with_report(&mut board) else {
            break;
        };
        board.mark(report.column);
        turn += 1;

        info!(
            "move {turn}: {side:?} -> column {} (score {}, {} nodes, {} ms{})",
            report.column,
            report.score,
            report.nodes,
            report.time_ms,
            if report.timed_out { ", timed out" } else { "" }
        );
        println!("move {turn}: {side:?} drops into column {}", report.column);
        println!("{board}");
    }

    match board.game_state() {
        GameState::Won(side) => println!("{side:?} wins after {turn} moves"),
        GameState::Draw => println!("draw after {turn} moves"),
        GameState::Open => println!("stopped with the game still open"),
    }
}

fn make_engine(args: &Args, moves_first: bool) -> Engine {
    let config = EngineConfig::new(args.rows, args.cols, args.win_len, moves_first, args.budget_secs);
    match args.seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    }
}
