//! Error types for the engine and the worker boundary

use thiserror::Error;

use crate::board::BOARD_SIZE;

/// Errors raised when a caller hands the engine a malformed position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the 15x15 grid
    #[error("invalid coordinate ({row}, {col}): must be within 0..{size}", size = BOARD_SIZE)]
    InvalidCoordinate { row: i32, col: i32 },

    /// The same intersection listed twice, or for both colors
    #[error("intersection ({row}, {col}) is listed more than once")]
    OverlappingStone { row: u8, col: u8 },

    /// Side to move must be black or white
    #[error("side to move must be black or white")]
    InvalidSide,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors on the worker message boundary
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A request arrived before `init`
    #[error("worker has not been initialized")]
    NotInitialized,

    /// A request line could not be decoded
    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),

    /// The engine rejected the observed position
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// `observe-move` on an occupied intersection
    #[error("intersection ({row}, {col}) is already occupied")]
    OccupiedCell { row: u8, col: u8 },

    /// `observe-move` removal of an empty intersection
    #[error("intersection ({row}, {col}) holds no stone to remove")]
    EmptyCell { row: u8, col: u8 },

    /// `init` carried an invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The search thread could not be started
    #[error("failed to start search thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread is gone
    #[error("worker thread has stopped")]
    Disconnected,
}

/// Result type alias for worker operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors loading an engine configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for `EngineConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range
    #[error("invalid config value for `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}
