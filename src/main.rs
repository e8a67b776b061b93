//! Zuniq-Rust: an MCTS engine for the CodeCup game Zuniq.
//!
//! ## Usage
//!
//! - `zuniq-rust` - Play over the CodeCup line protocol on stdin/stdout
//! - `zuniq-rust play` - Same, explicitly
//! - `zuniq-rust demo` - Watch a quick self-play game

use anyhow::Result;
use clap::{Parser, Subcommand};

use zuniq_rust::board::{Board, Player};
use zuniq_rust::constants::TEMPERATURE;
use zuniq_rust::mcts::MctsAgent;
use zuniq_rust::protocol::{GameSession, format_move};
use zuniq_rust::time_strategy::{Context, TimeStrategy};

/// Zuniq-Rust: an MCTS engine for Zuniq
#[derive(Parser)]
#[command(name = "zuniq-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the search RNG (entropy-seeded if omitted)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game over the CodeCup line protocol (the default)
    Play,
    /// Run a quick MCTS self-play game
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    eprintln!("zuniq-rust {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Demo) => run_demo(cli.seed),
        Some(Commands::Play) | None => GameSession::new(cli.seed).run(),
    }
}

fn run_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let strategy = TimeStrategy::Constant {
        total_millis: 10_000,
    };
    let mut white = MctsAgent::new(Player::White, 2_000, TEMPERATURE, strategy);
    let mut black = MctsAgent::new(Player::Black, 2_000, TEMPERATURE, strategy);

    let mut board = Board::new();
    let mut round = 0;
    while !board.is_over() {
        let ctx = Context {
            round,
            elapsed_millis: 0,
        };
        let agent = match board.turn() {
            Player::White => &mut white,
            Player::Black => &mut black,
        };
        let (mv, claiming) = agent.select_move(&board, &ctx, &mut rng);
        board.apply(mv)?;
        round += 1;
        println!(
            "{round:2}. {}{}",
            format_move(mv),
            if claiming { "!" } else { "" }
        );
    }
    println!("winner: {:?}", board.winner());
    Ok(())
}
