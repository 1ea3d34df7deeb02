//! Pattern scores for Gomoku evaluation
//!
//! Only the relative ordering matters to the search:
//! five >> open four >> blocked four > open three >> blocked three > open two > blocked two > one.

use crate::rules::LineRun;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: f64 = 1e11;

    /// Open four: _OOOO_ (unstoppable next-move win)
    pub const OPEN_FOUR: f64 = 1e6;
    /// Blocked four: XOOOO_ or _OOOOX
    pub const BLOCKED_FOUR: f64 = 1e4;

    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: f64 = 5e3;
    /// Blocked three: XOOO_ or _OOOX
    pub const BLOCKED_THREE: f64 = 1e2;

    /// Open two: _OO_
    pub const OPEN_TWO: f64 = 10.0;
    /// Blocked two: XOO_ or _OOX
    pub const BLOCKED_TWO: f64 = 1.0;

    /// Lone stone on an axis, regardless of its ends
    pub const ONE: f64 = 0.1;
}

/// Score of a single line run.
///
/// Runs with no open end below five are dead and score nothing.
#[inline]
pub fn pattern_score(run: LineRun) -> f64 {
    match (run.consecutive, run.open_ends) {
        (5.., _) => PatternScore::FIVE,
        (4, 2) => PatternScore::OPEN_FOUR,
        (4, 1) => PatternScore::BLOCKED_FOUR,
        (3, 2) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::BLOCKED_THREE,
        (2, 2) => PatternScore::OPEN_TWO,
        (2, 1) => PatternScore::BLOCKED_TWO,
        (1, _) => PatternScore::ONE,
        _ => 0.0,
    }
}
