//! Position evaluation module
//!
//! This module contains:
//! - Pattern scoring constants
//! - Static evaluation and move-promise heuristics
//! - Win-probability estimation

pub mod heuristic;
pub mod patterns;
pub mod probability;

pub use heuristic::{evaluate_for_player, evaluate_position, evaluate_stone, move_promise};
pub use patterns::{pattern_score, PatternScore};
pub use probability::{win_probability, WinProbability};
