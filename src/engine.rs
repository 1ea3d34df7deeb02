//! Game search engine tying the opening rules, critical checks and search together
//!
//! A move is chosen by the first phase that produces one:
//!
//! 1. **Opening**: fixed replies for empty and one-stone boards
//! 2. **Critical moves**: wins, forced blocks and open-four/open-three threats
//! 3. **Search**: negamax over ordered candidates
//! 4. **Fallback**: proximity and centre heuristic when search finds nothing
//!
//! # Example
//!
//! ```
//! use gomoku::{BoardState, EngineConfig, GameSearchEngine, MoveKind, Stone};
//!
//! let engine = GameSearchEngine::with_config(EngineConfig::default().with_depth(2));
//! let state = BoardState::new()
//!     .with(Stone::Black, 7, 7)
//!     .with(Stone::White, 7, 8);
//!
//! let mv = engine.find_best_move(&state, Stone::Black).unwrap().unwrap();
//! println!("({}, {}) {:?}", mv.row, mv.col, mv.kind);
//! assert_ne!(mv.kind, MoveKind::Fallback);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, BoardState, Pos, Stone, BOARD_SIZE, CENTER};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::eval::{self, WinProbability};
use crate::search::{find_critical_move, CancelToken, CriticalMove, SearchResult, Searcher, Threat, ZobristTable};

/// Replies to a lone stone on the centre, in preference order
const CENTER_REPLIES: [(u8, u8); 4] = [(6, 7), (8, 7), (7, 6), (7, 8)];

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    /// Fixed reply on an empty or one-stone board
    Opening,
    /// Completes five
    Winning,
    /// Stops the opponent's five
    ForcedBlock,
    /// Makes an open four
    OpenFour,
    /// Stops the opponent's open four
    BlockOpenFour,
    /// Makes several open threes at once
    MultipleOpenThrees { count: usize },
    /// Stops the opponent's double open three
    BlockMultipleOpenThrees,
    /// Makes an open three
    OpenThree,
    /// Chosen by negamax
    Searched,
    /// Proximity heuristic used when search produced nothing
    Fallback,
}

impl From<CriticalMove> for MoveKind {
    fn from(critical: CriticalMove) -> Self {
        match critical.threat {
            Threat::Win => MoveKind::Winning,
            Threat::BlockFive => MoveKind::ForcedBlock,
            Threat::OpenFour => MoveKind::OpenFour,
            Threat::BlockOpenFour => MoveKind::BlockOpenFour,
            Threat::MultipleOpenThrees => MoveKind::MultipleOpenThrees {
                count: critical.count,
            },
            Threat::BlockMultipleOpenThrees => MoveKind::BlockMultipleOpenThrees,
            Threat::OpenThree => MoveKind::OpenThree,
        }
    }
}

/// A recommended move.
///
/// Serializes as `{ "r", "c", "score", "kind", "cancelled" }`. Infinite
/// scores are written as the strings `"inf"` / `"-inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    #[serde(rename = "r")]
    pub row: u8,
    #[serde(rename = "c")]
    pub col: u8,
    /// Score from the mover's perspective
    #[serde(with = "score_serde")]
    pub score: f64,
    pub kind: MoveKind,
    /// The search was stopped early and this is its best-so-far
    #[serde(default)]
    pub cancelled: bool,
}

impl MoveResult {
    #[inline]
    fn new(pos: Pos, score: f64, kind: MoveKind) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            score,
            kind,
            cancelled: false,
        }
    }

    #[inline]
    fn opening(pos: Pos) -> Self {
        Self::new(pos, 0.0, MoveKind::Opening)
    }

    #[inline]
    fn critical(critical: CriticalMove) -> Self {
        Self::new(critical.pos, critical.score(), critical.into())
    }

    #[inline]
    fn searched(pos: Pos, score: f64, cancelled: bool) -> Self {
        Self {
            cancelled,
            ..Self::new(pos, score, MoveKind::Searched)
        }
    }

    #[inline]
    fn fallback(pos: Pos) -> Self {
        Self::new(pos, 0.0, MoveKind::Fallback)
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }
}

/// Serde adapter writing non-finite scores as strings, since JSON has no
/// infinity.
pub(crate) mod score_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if score.is_finite() {
            serializer.serialize_f64(*score)
        } else if *score > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(t) => match t.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid score `{other}`"))),
            },
        }
    }
}

/// Registers a call's token with the engine for as long as the call runs.
struct Session<'a> {
    sessions: &'a Mutex<Vec<CancelToken>>,
    token: CancelToken,
}

impl<'a> Session<'a> {
    fn open(sessions: &'a Mutex<Vec<CancelToken>>, token: &CancelToken) -> Self {
        lock(sessions).push(token.clone());
        Self {
            sessions,
            token: token.clone(),
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        let mut sessions = lock(self.sessions);
        if let Some(i) = sessions.iter().position(|t| t.shares_flag(&self.token)) {
            sessions.swap_remove(i);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Gomoku move search and position evaluation.
///
/// Every call rebuilds a private board from the caller's [`BoardState`] and
/// runs on its own cancellation token, so the engine is `Send + Sync` and
/// several calls may share one `Arc<GameSearchEngine>`.
pub struct GameSearchEngine {
    config: EngineConfig,
    zobrist: ZobristTable,
    /// Tokens of the calls in flight
    sessions: Mutex<Vec<CancelToken>>,
    rng: Mutex<StdRng>,
}

impl GameSearchEngine {
    /// Engine with default settings (depth 5, breadth 12/8, deterministic)
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            zobrist: ZobristTable::new(),
            sessions: Mutex::new(Vec::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend a move for `side`, or `None` when the board is full.
    ///
    /// Each call gets a fresh token, so a
    /// [`cancel_search`](Self::cancel_search) issued before the call has no
    /// effect on it.
    pub fn find_best_move(&self, state: &BoardState, side: Stone) -> EngineResult<Option<MoveResult>> {
        self.find_best_move_with_token(state, side, &CancelToken::new())
    }

    /// [`find_best_move`](Self::find_best_move) that also stops when the
    /// caller's token is cancelled.
    pub fn find_best_move_with_token(
        &self,
        state: &BoardState,
        side: Stone,
        token: &CancelToken,
    ) -> EngineResult<Option<MoveResult>> {
        if side == Stone::Empty {
            return Err(EngineError::InvalidSide);
        }
        let mut board = state.to_board()?;
        let _session = Session::open(&self.sessions, token);

        if board.is_full() {
            debug!("board is full, no move");
            return Ok(None);
        }

        let mv = if let Some(pos) = opening_move(&board) {
            MoveResult::opening(pos)
        } else if let Some(critical) = find_critical_move(&mut board, side) {
            debug!(threat = ?critical.threat, row = critical.pos.row, col = critical.pos.col, "critical move");
            MoveResult::critical(critical)
        } else {
            let mut searcher = Searcher::new(&self.zobrist, self.config.breadth, self.config.tt_size_mb, token.clone());
            let result = searcher.search(&mut board, side, self.config.max_depth);
            match result.best_move {
                Some(best) => {
                    let (pos, score) = if result.cancelled {
                        (best, result.score)
                    } else {
                        self.pick(&result, best)
                    };
                    MoveResult::searched(pos, score, result.cancelled)
                }
                None => match best_fallback(&board) {
                    Some(pos) => MoveResult::fallback(pos),
                    None => return Ok(None),
                },
            }
        };

        assert!(
            board.is_empty(mv.pos()),
            "engine chose occupied intersection ({}, {})",
            mv.row,
            mv.col
        );
        info!(%side, row = mv.row, col = mv.col, kind = ?mv.kind, cancelled = mv.cancelled, "move chosen");
        Ok(Some(mv))
    }

    /// Apply the randomness knob: a uniform pick among finished root
    /// candidates scoring within `randomness * |best|` of the best.
    fn pick(&self, result: &SearchResult, best: Pos) -> (Pos, f64) {
        let randomness = self.config.randomness;
        if randomness <= 0.0 || !result.score.is_finite() {
            return (best, result.score);
        }
        let floor = result.score - randomness * result.score.abs();
        let near: Vec<_> = result.scored.iter().filter(|m| m.score >= floor).collect();
        let mut rng = lock(&self.rng);
        match near.choose(&mut *rng) {
            Some(m) => (m.pos, m.score),
            None => (best, result.score),
        }
    }

    /// Estimate each color's chance of winning with `to_move` on move.
    pub fn evaluate_win_probability(&self, state: &BoardState, to_move: Stone) -> EngineResult<WinProbability> {
        if to_move == Stone::Empty {
            return Err(EngineError::InvalidSide);
        }
        let mut board = state.to_board()?;
        Ok(eval::win_probability(&mut board, to_move))
    }

    /// Static evaluation from `side`'s perspective: own pattern total minus
    /// the opponent's.
    pub fn evaluate_position(&self, state: &BoardState, side: Stone) -> EngineResult<f64> {
        if side == Stone::Empty {
            return Err(EngineError::InvalidSide);
        }
        let board = state.to_board()?;
        Ok(eval::evaluate_position(&board, side))
    }

    /// The proximity and centre heuristic move, without search.
    pub fn fallback_move(&self, state: &BoardState) -> EngineResult<Option<MoveResult>> {
        let board = state.to_board()?;
        Ok(best_fallback(&board).map(MoveResult::fallback))
    }

    /// Stop every search in flight on this engine. Idempotent.
    pub fn cancel_search(&self) {
        for token in lock(&self.sessions).iter() {
            token.cancel();
        }
    }

    /// Whether any `find_best_move` call is in progress
    pub fn is_computing(&self) -> bool {
        !lock(&self.sessions).is_empty()
    }
}

impl Default for GameSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed reply for boards with fewer than two stones.
///
/// The centre whenever it is free. Lone stone on the centre: the first free
/// cell of up, down, left, right of it.
fn opening_move(board: &Board) -> Option<Pos> {
    match board.stone_count() {
        0 | 1 if board.is_empty(CENTER) => Some(CENTER),
        1 => CENTER_REPLIES
            .into_iter()
            .map(|(r, c)| Pos::new(r, c))
            .find(|&pos| board.is_empty(pos)),
        _ => None,
    }
}

/// Empty cell maximising `15 - manhattan(centre) + 5 * occupied neighbours`,
/// first row-major on ties.
fn best_fallback(board: &Board) -> Option<Pos> {
    let mut best: Option<(Pos, i32)> = None;
    for pos in board.empty_cells() {
        let neighbours = (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| (dr, dc) != (0, 0))
            .filter_map(|(dr, dc)| pos.offset(dr, dc, 1))
            .filter(|&near| !board.is_empty(near))
            .count();
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let score = BOARD_SIZE as i32 - i32::from(pos.manhattan(CENTER)) + 5 * neighbours as i32;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }
    best.map(|(pos, _)| pos)
}
