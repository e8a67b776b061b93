//! Per-move time allowances.
//!
//! A strategy is a pure function from the game context (round number,
//! wall-clock already spent) to how many milliseconds the next search may
//! take. The variants form a closed set, so they are a plain enum rather
//! than a trait object.

/// Game-progress facts an agent or time strategy may consult.
#[derive(Copy, Clone, Debug, Default)]
pub struct Context {
    /// Number of half-moves already played in the game.
    pub round: u32,
    /// Wall-clock milliseconds this side has used so far.
    pub elapsed_millis: u32,
}

#[derive(Copy, Clone, Debug)]
pub enum TimeStrategy {
    /// A fixed slice of the total budget, context ignored.
    Constant { total_millis: u32 },
    /// Spreads what is left of the budget over the moves expected to remain.
    RemainingTime { total_millis: u32 },
    /// Fixed schedule by round bracket: cheap opening, expensive midgame.
    HardCoded,
}

impl TimeStrategy {
    /// Milliseconds the current move may spend.
    pub fn allowance(&self, ctx: &Context) -> f64 {
        match *self {
            TimeStrategy::Constant { total_millis } => 0.995 * total_millis as f64 / 20.0,
            TimeStrategy::RemainingTime { total_millis } => {
                let remaining_moves = (20 - ctx.round as i32 / 2).max(1);
                let remaining = total_millis.saturating_sub(ctx.elapsed_millis);
                0.999 * remaining as f64 / remaining_moves as f64
            }
            TimeStrategy::HardCoded => match ctx.round {
                0..=9 => 96.0,
                10..=19 => 296.0,
                20..=24 => 1_500.0,
                25..=34 => 4_700.0,
                35..=36 => 400.0,
                _ => 50.0,
            },
        }
    }
}
