//! Monte Carlo Tree Search over board snapshots.
//!
//! The tree lives in an arena (`Vec<Node>`) with parent/child indices, so
//! nodes need no self-referential pointers and the whole tree is dropped at
//! once when the decision is made. Each round runs the classic four steps:
//! UCT selection, expansion from a pre-shuffled move queue, a random rollout,
//! and backpropagation to the root. The loop stops at a round ceiling or,
//! polled every few rounds, when the time strategy's allowance is spent.

use std::time::Instant;

use crate::board::{Board, Move, Player};
use crate::constants::{
    BLACK_USE_WEIGHTED_ROLLOUT, MIN_ROUND_TO_CLAIM_WIN, TIME_CHECK_PERIOD, WHITE_USE_WEIGHTED_ROLLOUT,
    WIN_CLAIM_THRESHOLD,
};
use crate::rollout::{self, RolloutPolicy};
use crate::time_strategy::{Context, TimeStrategy};

struct Node {
    board: Board,
    parent: Option<usize>,
    /// The move that produced this node; absent at the root.
    mv: Option<Move>,
    /// Legal moves not yet expanded, pre-shuffled so popping the back is a
    /// uniform draw.
    untried: Vec<Move>,
    children: Vec<usize>,
    rollouts: u32,
    white_wins: u32,
    black_wins: u32,
}

impl Node {
    fn new(board: Board, parent: Option<usize>, mv: Option<Move>, rng: &mut fastrand::Rng) -> Self {
        let mut untried: Vec<Move> = board.legal_moves().iter().collect();
        rng.shuffle(&mut untried);
        Self {
            board,
            parent,
            mv,
            untried,
            children: Vec::new(),
            rollouts: 0,
            white_wins: 0,
            black_wins: 0,
        }
    }

    fn can_expand(&self) -> bool {
        !self.untried.is_empty()
    }

    fn is_terminal(&self) -> bool {
        self.board.is_over()
    }

    fn record_win(&mut self, winner: Player) {
        match winner {
            Player::White => self.white_wins += 1,
            Player::Black => self.black_wins += 1,
        }
        self.rollouts += 1;
    }

    /// Fraction of rollouts through this node won by `player`. Only called
    /// on nodes with at least one rollout.
    fn win_fraction(&self, player: Player) -> f64 {
        let wins = match player {
            Player::White => self.white_wins,
            Player::Black => self.black_wins,
        };
        wins as f64 / self.rollouts as f64
    }
}

/// MCTS-backed move planner for one side.
pub struct MctsAgent {
    color: Player,
    num_rounds: u32,
    temperature: f64,
    time_strategy: TimeStrategy,
    white_rollout: RolloutPolicy,
    black_rollout: RolloutPolicy,
    claimed_win: bool,
}

impl MctsAgent {
    pub fn new(
        color: Player,
        num_rounds: u32,
        temperature: f64,
        time_strategy: TimeStrategy,
    ) -> Self {
        Self {
            color,
            num_rounds,
            temperature,
            time_strategy,
            white_rollout: RolloutPolicy::from_toggle(WHITE_USE_WEIGHTED_ROLLOUT),
            black_rollout: RolloutPolicy::from_toggle(BLACK_USE_WEIGHTED_ROLLOUT),
            claimed_win: false,
        }
    }

    pub fn set_color(&mut self, color: Player) {
        self.color = color;
    }

    /// Search from `board` and return the best move found, plus whether this
    /// move claims the win. The claim fires at most once per agent lifetime:
    /// the chosen child's win rate must beat the claim threshold and the game
    /// must have reached the minimum claiming round.
    pub fn select_move(
        &mut self,
        board: &Board,
        ctx: &Context,
        rng: &mut fastrand::Rng,
    ) -> (Move, bool) {
        assert_eq!(board.turn(), self.color, "agent asked to move out of turn");
        assert!(!board.is_over(), "agent asked to move in a finished game");

        let clock = Instant::now();
        let allowance = self.time_strategy.allowance(ctx);

        let mut arena: Vec<Node> = Vec::with_capacity(1024);
        arena.push(Node::new(*board, None, None, rng));

        for round in 0..self.num_rounds {
            // Poll the deadline coarsely; round 0 always runs so an empty
            // allowance still yields a move.
            if round % TIME_CHECK_PERIOD == 0
                && round > 0
                && clock.elapsed().as_millis() as f64 >= allowance
            {
                break;
            }

            // Selection: descend while fully expanded and not terminal.
            let mut idx = 0;
            while !arena[idx].can_expand() && !arena[idx].is_terminal() {
                idx = self.select_child(&arena, idx);
            }

            // Expansion.
            if arena[idx].can_expand() {
                idx = expand(&mut arena, idx, rng);
            }

            // Simulation.
            let winner = rollout::simulate(
                arena[idx].board,
                self.white_rollout,
                self.black_rollout,
                rng,
            );

            // Backpropagation, root inclusive.
            let mut cur = Some(idx);
            while let Some(i) = cur {
                arena[i].record_win(winner);
                cur = arena[i].parent;
            }
        }

        // Final choice exploits the estimated value: best win rate for the
        // side to move, not most visits. First strict maximum wins ties.
        let mover = board.turn();
        let mut best: Option<(Move, f64)> = None;
        for &child in &arena[0].children {
            let frac = arena[child].win_fraction(mover);
            if best.is_none_or(|(_, best_frac)| frac > best_frac) {
                let mv = arena[child].mv.expect("non-root node carries its move");
                best = Some((mv, frac));
            }
        }
        let (best_move, best_frac) = best.expect("search expanded no children");

        let claiming = best_frac > WIN_CLAIM_THRESHOLD
            && !self.claimed_win
            && ctx.round >= MIN_ROUND_TO_CLAIM_WIN;
        self.claimed_win = self.claimed_win || claiming;
        (best_move, claiming)
    }

    /// UCT: the child maximizing `winRate + temperature * sqrt(ln(parent
    /// rollouts) / child rollouts)`, win rate taken for the player to move at
    /// the parent. First strict maximum wins ties.
    fn select_child(&self, arena: &[Node], parent: usize) -> usize {
        let node = &arena[parent];
        let mover = node.board.turn();
        let log_rollouts = (node.rollouts as f64).ln();

        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in &node.children {
            let exploitation = arena[child].win_fraction(mover);
            let exploration = (log_rollouts / arena[child].rollouts as f64).sqrt();
            let score = exploitation + self.temperature * exploration;
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }
}

/// Pop the next untried move, apply it on a cloned board, and append the
/// resulting node as a child. Returns the new node's index.
fn expand(arena: &mut Vec<Node>, parent: usize, rng: &mut fastrand::Rng) -> usize {
    let mv = arena[parent]
        .untried
        .pop()
        .expect("expand called on a fully expanded node");
    let mut board = arena[parent].board;
    board
        .apply(mv)
        .expect("untried queue holds only legal moves");
    let node = Node::new(board, Some(parent), Some(mv), rng);
    let idx = arena.len();
    arena.push(node);
    arena[parent].children.push(idx);
    idx
}
