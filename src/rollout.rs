//! Randomized playouts for position evaluation.
//!
//! A rollout plays random legal moves for both sides until the game ends and
//! reports the winner. The weighted policy biases the draw toward moves that
//! seal a region right now; with both weights equal it degenerates to the
//! uniform policy.

use crate::board::{Board, Move, Player};
use crate::constants::{WEIGHT_CLOSE_REGION_MOVE, WEIGHT_REGULAR_MOVE};

#[derive(Copy, Clone, Debug)]
pub enum RolloutPolicy {
    /// Every legal move is equally likely.
    Uniform,
    /// Region-closing moves are drawn with `close_weight`, the rest with
    /// `regular_weight`.
    Weighted {
        close_weight: f64,
        regular_weight: f64,
    },
}

impl RolloutPolicy {
    /// The configured policy for one side of the rollout.
    pub fn from_toggle(weighted: bool) -> Self {
        if weighted {
            RolloutPolicy::Weighted {
                close_weight: WEIGHT_CLOSE_REGION_MOVE,
                regular_weight: WEIGHT_REGULAR_MOVE,
            }
        } else {
            RolloutPolicy::Uniform
        }
    }

    /// Sample one legal move. The board must not be terminal.
    pub fn sample(&self, board: &Board, rng: &mut fastrand::Rng) -> Move {
        let moves: Vec<Move> = board.legal_moves().iter().collect();
        debug_assert!(!moves.is_empty(), "sampling from a finished game");
        match *self {
            RolloutPolicy::Uniform => moves[rng.usize(..moves.len())],
            RolloutPolicy::Weighted {
                close_weight,
                regular_weight,
            } => {
                let weights: Vec<f64> = moves
                    .iter()
                    .map(|&m| {
                        if board.is_closing_move(m) {
                            close_weight
                        } else {
                            regular_weight
                        }
                    })
                    .collect();
                let total: f64 = weights.iter().sum();
                let mut target = rng.f64() * total;
                // Walk the cumulative weights; rounding can only push the
                // draw to the last move.
                let mut chosen = moves.len() - 1;
                for (i, w) in weights.iter().enumerate() {
                    target -= w;
                    if target < 0.0 {
                        chosen = i;
                        break;
                    }
                }
                moves[chosen]
            }
        }
    }
}

/// Alternate policy moves for both sides until the game ends.
pub fn simulate(
    mut board: Board,
    white: RolloutPolicy,
    black: RolloutPolicy,
    rng: &mut fastrand::Rng,
) -> Player {
    while !board.is_over() {
        let policy = match board.turn() {
            Player::White => white,
            Player::Black => black,
        };
        let mv = policy.sample(&board, rng);
        board
            .apply(mv)
            .expect("rollout sampled a move outside the legal set");
    }
    board.winner()
}

/// Plays a policy draw as its move. Covers the opening rounds, where a
/// search adds nothing over noise.
pub struct RandomAgent {
    color: Player,
    policy: RolloutPolicy,
}

impl RandomAgent {
    pub fn new(color: Player, policy: RolloutPolicy) -> Self {
        Self { color, policy }
    }

    pub fn set_color(&mut self, color: Player) {
        self.color = color;
    }

    pub fn select_move(&self, board: &Board, rng: &mut fastrand::Rng) -> Move {
        assert_eq!(
            board.turn(),
            self.color,
            "random agent asked to move out of turn"
        );
        self.policy.sample(board, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_move;

    #[test]
    fn uniform_sample_is_legal() {
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..100 {
            let mv = RolloutPolicy::Uniform.sample(&board, &mut rng);
            assert!(board.is_valid(mv));
        }
    }

    #[test]
    fn heavy_close_weight_dominates_the_draw() {
        let mut board = Board::new();
        for m in ["C3h", "D3h", "C3v"] {
            board.apply(parse_move(m).unwrap()).unwrap();
        }
        // C4v is the lone closing move among 57 legal ones.
        let closing = parse_move("C4v").unwrap();
        assert!(board.is_closing_move(closing));

        let policy = RolloutPolicy::Weighted {
            close_weight: 10_000.0,
            regular_weight: 1.0,
        };
        let mut rng = fastrand::Rng::with_seed(23);
        let hits = (0..200)
            .filter(|_| policy.sample(&board, &mut rng) == closing)
            .count();
        assert!(hits > 180, "closing move drawn only {hits}/200 times");
    }

    #[test]
    fn equal_weights_match_uniform_support() {
        let board = Board::new();
        let policy = RolloutPolicy::Weighted {
            close_weight: 1.0,
            regular_weight: 1.0,
        };
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..50 {
            assert!(board.is_valid(policy.sample(&board, &mut rng)));
        }
    }

    #[test]
    fn simulation_reaches_a_winner() {
        let mut rng = fastrand::Rng::with_seed(42);
        let winner = simulate(
            Board::new(),
            RolloutPolicy::Uniform,
            RolloutPolicy::Uniform,
            &mut rng,
        );
        assert!(matches!(winner, Player::White | Player::Black));
    }

    #[test]
    #[should_panic(expected = "out of turn")]
    fn random_agent_checks_its_color() {
        let board = Board::new();
        let agent = RandomAgent::new(Player::Black, RolloutPolicy::Uniform);
        let mut rng = fastrand::Rng::with_seed(1);
        let _ = agent.select_move(&board, &mut rng);
    }
}
