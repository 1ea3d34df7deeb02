//! Gomoku search engine for freestyle five-in-a-row
//!
//! A negamax engine with alpha-beta pruning for the 15x15 game:
//! - Five or more in a row wins (overlines count)
//! - Tactical shortcuts for wins, forced blocks and open threats
//! - Pattern-based static evaluation and win-probability estimates
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards, caller-facing [`BoardState`]
//! - [`rules`]: Win detection and line threat predicates
//! - [`eval`]: Pattern scores, static evaluation, move promise, win probability
//! - [`search`]: Critical-move checks, candidate ordering, negamax, position cache
//! - [`engine`]: [`GameSearchEngine`] integrating all components
//! - [`config`]: [`EngineConfig`] loaded from TOML
//! - [`protocol`] and [`worker`]: message-driven engine thread per color
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{BoardState, EngineConfig, GameSearchEngine, Stone};
//!
//! // Shallow search keeps the doc test quick
//! let engine = GameSearchEngine::with_config(EngineConfig::default().with_depth(3));
//!
//! let state = BoardState::new()
//!     .with(Stone::Black, 7, 7)
//!     .with(Stone::White, 8, 8)
//!     .with(Stone::Black, 7, 8);
//!
//! if let Some(mv) = engine.find_best_move(&state, Stone::White).unwrap() {
//!     println!("White plays ({}, {}) [{:?}]", mv.row, mv.col, mv.kind);
//! }
//!
//! let p = engine.evaluate_win_probability(&state, Stone::White).unwrap();
//! assert!((p.black + p.white - 1.0).abs() < 1e-9);
//! ```
//!
//! # Move Priority
//!
//! 1. Opening replies on empty and one-stone boards
//! 2. Own five, then blocking the opponent's five
//! 3. Own open four, then blocking the opponent's
//! 4. Own double open three, blocking one, own open three
//! 5. Negamax over the best-looking candidates
//! 6. Proximity fallback when search finds nothing

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, BoardState, Pos, Stone, BOARD_SIZE};
pub use config::{Breadth, EngineConfig};
pub use engine::{GameSearchEngine, MoveKind, MoveResult};
pub use error::{ConfigError, EngineError, EngineResult, ProtocolError};
pub use eval::WinProbability;
pub use search::CancelToken;
