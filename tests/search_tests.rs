//! Search integration tests: MCTS behavior on real positions, sized down
//! from tournament settings so the suite stays fast.

use zuniq_rust::board::{Board, Move, Player};
use zuniq_rust::constants::TEMPERATURE;
use zuniq_rust::mcts::MctsAgent;
use zuniq_rust::protocol::parse_move;
use zuniq_rust::time_strategy::{Context, TimeStrategy};

fn mv(s: &str) -> Move {
    parse_move(s).unwrap()
}

fn replay(board: &mut Board, moves: &[&str]) {
    for m in moves {
        board
            .apply(mv(m))
            .unwrap_or_else(|e| panic!("replaying {m}: {e}"));
    }
}

fn agent(color: Player, rounds: u32) -> MctsAgent {
    // A constant slice of a huge budget: effectively round-limited.
    MctsAgent::new(
        color,
        rounds,
        TEMPERATURE,
        TimeStrategy::Constant {
            total_millis: 600_000,
        },
    )
}

/// Tournament game "Player3 vs Zuniq", decided by move 34: White is clearly
/// winning afterwards, so White claims once and only once, and losing Black
/// never claims.
#[test]
fn win_claim_is_one_shot_and_sticky() {
    let mut board = Board::new();
    replay(
        &mut board,
        &[
            "D4v", "D2h", "E5v", "C6v", "E4h", "E1v", "A4h", "C1h", "E1h", "D1v", // 10
            "F2h", "A5v", "A1v", "C2v", "A1h", "D1h", "F3h", "C5h", "D5v", "B3v", // 20
            "A2h", "E2h", "E5h", "B3h", "E3h", "C4v", "B5v", "B2h", "D5h", "C3h", // 30
            "D2v", "F4h!", "E3v", "C4h", // 34
        ],
    );

    let mut white = agent(Player::White, 4_000);
    let mut black = agent(Player::Black, 4_000);
    let mut rng = fastrand::Rng::with_seed(17);

    let ctx = Context {
        round: 33,
        elapsed_millis: 22_000,
    };
    let (white_move, claiming) = white.select_move(&board, &ctx, &mut rng);
    assert!(board.is_valid(white_move));
    assert!(claiming, "a decisively winning position should be claimed");

    board.apply(mv("B6v")).unwrap(); // 35
    let ctx = Context {
        round: 34,
        elapsed_millis: 24_000,
    };
    let (black_move, claiming) = black.select_move(&board, &ctx, &mut rng);
    assert!(board.is_valid(black_move));
    assert!(!claiming, "the losing side must not claim");

    replay(&mut board, &["F5h", "A6v", "A3h"]); // 38
    let ctx = Context {
        round: 37,
        elapsed_millis: 28_000,
    };
    let (white_move, claiming) = white.select_move(&board, &ctx, &mut rng);
    assert!(board.is_valid(white_move));
    assert!(!claiming, "the claim flag is one-shot");

    board.apply(mv("B1v")).unwrap(); // 39
    assert!(board.is_over());
    assert_eq!(board.winner(), Player::White);
}

/// Even a decisive position is not claimed before the minimum round.
#[test]
fn no_claim_before_the_minimum_round() {
    let mut board = Board::new();
    replay(
        &mut board,
        &[
            "D4v", "D2h", "E5v", "C6v", "E4h", "E1v", "A4h", "C1h", "E1h", "D1v", // 10
            "F2h", "A5v", "A1v", "C2v", "A1h", "D1h", "F3h", "C5h", "D5v", "B3v", // 20
            "A2h", "E2h", "E5h", "B3h", "E3h", "C4v", "B5v", "B2h", "D5h", "C3h", // 30
            "D2v", "F4h!", "E3v", "C4h", // 34
        ],
    );
    let mut white = agent(Player::White, 4_000);
    let mut rng = fastrand::Rng::with_seed(17);
    let ctx = Context {
        round: 10,
        elapsed_millis: 0,
    };
    let (_, claiming) = white.select_move(&board, &ctx, &mut rng);
    assert!(!claiming);
}

/// Two short-search agents finish a legal game from the empty board.
#[test]
fn self_play_reaches_a_verdict() {
    let mut white = agent(Player::White, 192);
    let mut black = agent(Player::Black, 192);
    let mut rng = fastrand::Rng::with_seed(2021);

    let mut board = Board::new();
    let mut round = 0;
    while !board.is_over() {
        let ctx = Context {
            round,
            elapsed_millis: 0,
        };
        let (chosen, _) = match board.turn() {
            Player::White => white.select_move(&board, &ctx, &mut rng),
            Player::Black => black.select_move(&board, &ctx, &mut rng),
        };
        assert!(board.is_valid(chosen));
        board.apply(chosen).unwrap();
        round += 1;
        assert!(round <= 60, "game ran past the move supply");
    }
    assert!(matches!(board.winner(), Player::White | Player::Black));
}
