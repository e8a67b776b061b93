//! CodeCup wire protocol: move notation and the game loop.
//!
//! The referee speaks one token per line on stdin/stdout. A move is a row
//! letter, a column digit, and an orientation (`"E5v"`), case-insensitive,
//! with an optional trailing `!` claiming a win. `Start` means this engine
//! opens the game as White; `Quit` ends the session. stdout carries only
//! protocol tokens; diagnostics go to stderr.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context as _;

use crate::board::{Board, Move, Player};
use crate::constants::{
    N, NUM_RANDOM_MOVE_ROUNDS, NUM_ROUNDS, TEMPERATURE, TOTAL_TIME_MILLIS,
};
use crate::mcts::MctsAgent;
use crate::rollout::{RandomAgent, RolloutPolicy};
use crate::time_strategy::{Context, TimeStrategy};
use crate::union_find::Vertex;

/// Why a protocol line failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not 3 characters (4 with a trailing `!`).
    Malformed(String),
    /// Row letter outside `A`..`F`.
    Row(char),
    /// Column digit outside `1`..`6`.
    Column(char),
    /// Orientation other than `h`/`v`.
    Orientation(char),
    /// The line would run off the grid (`h` in the last column, `v` in the
    /// last row).
    OffBoard(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed(s) => write!(f, "malformed move {s:?}"),
            ParseError::Row(c) => write!(f, "bad row letter {c:?}"),
            ParseError::Column(c) => write!(f, "bad column digit {c:?}"),
            ParseError::Orientation(c) => write!(f, "bad orientation {c:?}"),
            ParseError::OffBoard(s) => write!(f, "move {s:?} runs off the grid"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Start,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(GameCommand),
    Move(Move),
}

/// Parse `"E5v"`-style notation, case-insensitive. A trailing `!` (the
/// opponent claiming a win) is accepted and ignored.
pub fn parse_move(s: &str) -> Result<Move, ParseError> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 3 || (bytes.len() == 4 && bytes[3] == b'!');
    if !well_formed {
        return Err(ParseError::Malformed(s.to_string()));
    }

    let row = bytes[0].to_ascii_uppercase().wrapping_sub(b'A') as usize;
    if row >= N {
        return Err(ParseError::Row(bytes[0] as char));
    }
    let col = bytes[1].wrapping_sub(b'1') as usize;
    if col >= N {
        return Err(ParseError::Column(bytes[1] as char));
    }

    let start = row * N + col;
    match bytes[2].to_ascii_lowercase() {
        b'h' if col < N - 1 => Ok(Move::new(start as Vertex, (start + 1) as Vertex)),
        b'v' if row < N - 1 => Ok(Move::new(start as Vertex, (start + N) as Vertex)),
        b'h' | b'v' => Err(ParseError::OffBoard(s.to_string())),
        other => Err(ParseError::Orientation(other as char)),
    }
}

/// Canonical 3-character notation for a move.
pub fn format_move(mv: Move) -> String {
    let row = mv.a() as usize / N;
    let col = mv.a() as usize % N;
    let orientation = if mv.is_horizontal() { 'h' } else { 'v' };
    format!(
        "{}{}{}",
        (b'A' + row as u8) as char,
        (b'1' + col as u8) as char,
        orientation
    )
}

/// Parse a full protocol line: a command or a move.
pub fn parse_input(s: &str) -> Result<Input, ParseError> {
    if s.eq_ignore_ascii_case("start") {
        Ok(Input::Command(GameCommand::Start))
    } else if s.eq_ignore_ascii_case("quit") {
        Ok(Input::Command(GameCommand::Quit))
    } else {
        parse_move(s).map(Input::Move)
    }
}

/// One game against the referee: board, agents, clocks, and the line loop.
pub struct GameSession {
    board: Board,
    round: u32,
    elapsed_millis: u32,
    random: RandomAgent,
    mcts: MctsAgent,
    rng: fastrand::Rng,
}

impl GameSession {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            board: Board::new(),
            round: 0,
            elapsed_millis: 0,
            // Until Start tells us otherwise, the opponent opens and we are
            // Black.
            random: RandomAgent::new(Player::Black, RolloutPolicy::Uniform),
            mcts: MctsAgent::new(
                Player::Black,
                NUM_ROUNDS,
                TEMPERATURE,
                TimeStrategy::RemainingTime {
                    total_millis: TOTAL_TIME_MILLIS,
                },
            ),
            rng,
        }
    }

    /// Run the referee loop until `Quit` or end of input. An illegal or
    /// unparseable opponent line is fatal for the game.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line.context("reading protocol input")?;
            let clock = Instant::now();
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let input = parse_input(line).with_context(|| format!("unrecognized input {line:?}"))?;
            match input {
                Input::Command(GameCommand::Quit) => break,
                Input::Command(GameCommand::Start) => {
                    self.random.set_color(Player::White);
                    self.mcts.set_color(Player::White);
                    self.play_own_move(&mut stdout, clock)?;
                }
                Input::Move(mv) => {
                    self.board
                        .apply(mv)
                        .with_context(|| format!("opponent played {}", format_move(mv)))?;
                    self.round += 1;
                    self.elapsed_millis += clock.elapsed().as_millis() as u32;
                    if self.board.is_over() {
                        eprintln!("game over, winner: {:?}", self.board.winner());
                        continue;
                    }
                    self.play_own_move(&mut stdout, Instant::now())?;
                }
            }
        }
        Ok(())
    }

    /// Pick, apply, and emit our move; `clock` has been running since our
    /// turn began.
    fn play_own_move(&mut self, out: &mut impl Write, clock: Instant) -> anyhow::Result<()> {
        let ctx = Context {
            round: self.round,
            elapsed_millis: self.elapsed_millis,
        };
        let (mv, claiming) = if self.round < NUM_RANDOM_MOVE_ROUNDS {
            (self.random.select_move(&self.board, &mut self.rng), false)
        } else {
            self.mcts.select_move(&self.board, &ctx, &mut self.rng)
        };
        self.board.apply(mv)?;
        self.round += 1;
        self.elapsed_millis += clock.elapsed().as_millis() as u32;

        let marker = if claiming { "!" } else { "" };
        writeln!(out, "{}{marker}", format_move(mv))?;
        out.flush()?;
        eprintln!(
            "round {}: played {}{marker} in {} ms ({} legal moves left, {} ms used)",
            self.round,
            format_move(mv),
            clock.elapsed().as_millis(),
            self.board.legal_moves().len(),
            self.elapsed_millis,
        );
        if self.board.is_over() {
            eprintln!("game over, winner: {:?}", self.board.winner());
        }
        Ok(())
    }
}
