//! Engine configuration
//!
//! Search breadth and move randomization are independent knobs: breadth caps
//! how many candidates each color searches, randomness lets the final pick
//! wander among near-best candidates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Stone;
use crate::error::ConfigError;

/// Default config file looked up by [`EngineConfig::load_or_default`]
pub const CONFIG_FILE: &str = "gomoku.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Negamax depth in plies, counting the root move
    pub max_depth: u8,
    /// Candidate budget per color
    pub breadth: Breadth,
    /// Fraction of the best score within which the final move is picked at
    /// random; 0 keeps the search deterministic
    pub randomness: f64,
    /// Seed for the randomized pick; `None` draws from the OS
    pub seed: Option<u64>,
    /// Position cache size in megabytes; 0 disables the cache
    pub tt_size_mb: usize,
}

/// Maximum candidates searched per node, per color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breadth {
    pub black: usize,
    pub white: usize,
}

impl Breadth {
    /// Same budget for both colors
    pub fn symmetric(n: usize) -> Self {
        Self { black: n, white: n }
    }

    #[inline]
    pub fn for_color(&self, stone: Stone) -> usize {
        match stone {
            Stone::White => self.white,
            _ => self.black,
        }
    }
}

impl Default for Breadth {
    fn default() -> Self {
        Self {
            black: 12,
            white: 8,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            breadth: Breadth::default(),
            randomness: 0.0,
            seed: None,
            tt_size_mb: 2,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// [`CONFIG_FILE`] from the working directory, or defaults if it is
    /// missing or invalid.
    pub fn load_or_default() -> Self {
        match Self::load(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(err) => {
                tracing::warn!(%err, "ignoring {CONFIG_FILE}, using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_depth",
                message: "must be at least 1".into(),
            });
        }
        if self.breadth.black == 0 || self.breadth.white == 0 {
            return Err(ConfigError::Invalid {
                field: "breadth",
                message: "each color needs at least one candidate".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(ConfigError::Invalid {
                field: "randomness",
                message: format!("{} is outside 0.0..=1.0", self.randomness),
            });
        }
        Ok(())
    }

    /// Builder: search depth
    pub fn with_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder: candidate budget
    pub fn with_breadth(mut self, breadth: Breadth) -> Self {
        self.breadth = breadth;
        self
    }

    /// Builder: randomized final pick
    pub fn with_randomness(mut self, randomness: f64, seed: Option<u64>) -> Self {
        self.randomness = randomness;
        self.seed = seed;
        self
    }
}
