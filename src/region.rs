//! Region analysis: does a cycle-completing line seal a finite region?
//!
//! Given a line whose endpoints are already connected, the 1 or 2 squares
//! beside the line seed a flood fill across square adjacency, blocked by
//! drawn lines. The fill is abandoned the instant it touches a perimeter
//! square whose outward-facing line is undrawn: leaking to the outside of
//! the board means the side is open, not a region.

use crate::board::{
    Move, MoveSet, Square, SquareSet, line_above, line_below, line_left, line_right, square_above,
    square_below, square_col, square_left, square_right, square_row,
};
use crate::constants::{N, TOTAL_SQUARES};

/// A sealed region: its square count and the squares themselves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub size: usize,
    pub squares: SquareSet,
}

/// The region sealed by `mv`, if any. `drawn` must already contain `mv`
/// (a candidate is probed by pretending it is played). The side above/left
/// of the line is tried first, then the other side.
pub fn enclosed_by(drawn: &MoveSet, mv: Move) -> Option<Region> {
    debug_assert!(drawn.contains(mv), "candidate line must count as drawn");
    let (first, second) = if mv.is_horizontal() {
        (square_above(mv), square_below(mv))
    } else {
        (square_left(mv), square_right(mv))
    };
    first
        .and_then(|sq| flood(drawn, sq))
        .or_else(|| second.and_then(|sq| flood(drawn, sq)))
}

/// Flood fill from `start`, crossing any undrawn line between neighbouring
/// squares. Returns `None` as soon as the fill can leak off the board.
fn flood(drawn: &MoveSet, start: Square) -> Option<Region> {
    let mut visited = SquareSet::EMPTY;
    visited.insert(start);
    let mut stack = Vec::with_capacity(TOTAL_SQUARES);
    stack.push(start);

    fn visit(visited: &mut SquareSet, stack: &mut Vec<Square>, sq: Square) {
        if !visited.contains(sq) {
            visited.insert(sq);
            stack.push(sq);
        }
    }

    while let Some(sq) = stack.pop() {
        if leaks_outside(drawn, sq) {
            return None;
        }
        let row = square_row(sq);
        let col = square_col(sq);
        if row > 0 && !drawn.contains(line_above(sq)) {
            visit(&mut visited, &mut stack, sq - (N as Square - 1));
        }
        if row < N - 2 && !drawn.contains(line_below(sq)) {
            visit(&mut visited, &mut stack, sq + (N as Square - 1));
        }
        if col > 0 && !drawn.contains(line_left(sq)) {
            visit(&mut visited, &mut stack, sq - 1);
        }
        if col < N - 2 && !drawn.contains(line_right(sq)) {
            visit(&mut visited, &mut stack, sq + 1);
        }
    }

    Some(Region {
        size: visited.len(),
        squares: visited,
    })
}

/// A perimeter square with its outward line undrawn is open to the outside.
fn leaks_outside(drawn: &MoveSet, sq: Square) -> bool {
    let row = square_row(sq);
    let col = square_col(sq);
    (row == 0 && !drawn.contains(line_above(sq)))
        || (col == 0 && !drawn.contains(line_left(sq)))
        || (row == N - 2 && !drawn.contains(line_below(sq)))
        || (col == N - 2 && !drawn.contains(line_right(sq)))
}
