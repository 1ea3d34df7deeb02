//! Game rules for freestyle Gomoku
//!
//! - Five or more in a row wins (overlines count)
//! - Line runs and their open ends classify threats (open four, open three)

pub mod lines;
pub mod win;

// Re-exports for convenient access
pub use lines::{
    count_consecutive_with_openness, count_open_threes, find_open_four, has_open_four,
    has_open_three, LineRun,
};
pub use win::{check_win, find_winner, has_five_in_row};
