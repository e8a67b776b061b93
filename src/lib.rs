//! Zuniq-Rust: an MCTS engine for the CodeCup game Zuniq.
//!
//! Zuniq is a territory-enclosure game on a 6x6 grid of points: each move
//! draws one line between adjacent points, sealing a region spends that
//! region's size forever, and the player left without a legal move loses.
//! This crate provides the incremental board model and a Monte Carlo Tree
//! Search planner, plus the CodeCup line protocol used in the tournament.
//!
//! ## Modules
//!
//! - [`constants`] - Grid dimensions and engine parameters
//! - [`board`] - Core game logic (legality, region closing, the no-repeat rule)
//! - [`region`] - Flood-fill analysis of sealed regions
//! - [`union_find`] - Vertex connectivity tracking
//! - [`mcts`] - Monte Carlo Tree Search planner
//! - [`rollout`] - Random playout policies
//! - [`time_strategy`] - Per-move time allowances
//! - [`protocol`] - Move notation and the CodeCup game loop
//!
//! ## Example
//!
//! ```
//! use zuniq_rust::board::{Board, Player};
//! use zuniq_rust::mcts::MctsAgent;
//! use zuniq_rust::protocol::{format_move, parse_move};
//! use zuniq_rust::time_strategy::{Context, TimeStrategy};
//!
//! // Answer an opening move with a short search.
//! let mut board = Board::new();
//! board.apply(parse_move("C3h")?)?;
//!
//! let mut agent = MctsAgent::new(
//!     Player::Black,
//!     256,
//!     0.45,
//!     TimeStrategy::Constant { total_millis: 10_000 },
//! );
//! let mut rng = fastrand::Rng::with_seed(7);
//! let ctx = Context { round: 1, elapsed_millis: 0 };
//!
//! let (reply, _claiming) = agent.select_move(&board, &ctx, &mut rng);
//! assert!(board.legal_moves().contains(reply));
//! println!("reply: {}", format_move(reply));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod constants;
pub mod mcts;
pub mod protocol;
pub mod region;
pub mod rollout;
pub mod time_strategy;
pub mod union_find;
