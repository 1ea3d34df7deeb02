//! Messages exchanged with a search worker
//!
//! One JSON object per message, tagged by `type`:
//!
//! ```text
//! -> {"type":"init","color":"white","config":{"max_depth":4}}
//! <- {"type":"initialized","color":"white"}
//! -> {"type":"observe-move","r":7,"c":7,"color":"black"}
//! <- {"type":"move-observed","r":7,"c":7}
//! -> {"type":"compute"}
//! <- {"type":"search-started"}
//! <- {"type":"decision","r":6,"c":7,"score":0.0,"kind":"opening","cancelled":false}
//! ```

use serde::{Deserialize, Serialize};

use crate::board::Stone;
use crate::config::EngineConfig;
use crate::engine::MoveResult;
use crate::error::ProtocolResult;
use crate::eval::WinProbability;

/// What an `observe-move` does to its intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellChange {
    Black,
    White,
    /// Take back the stone on the intersection
    Remove,
}

impl CellChange {
    /// Stone placed, or `None` for a removal
    pub fn stone(self) -> Option<Stone> {
        match self {
            CellChange::Black => Some(Stone::Black),
            CellChange::White => Some(Stone::White),
            CellChange::Remove => None,
        }
    }
}

/// Controller to worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    /// Bind the worker to a color, clearing its board
    Init {
        color: Stone,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<EngineConfig>,
    },
    /// Mirror a move (or takeback) made in the game
    ObserveMove { r: i32, c: i32, color: CellChange },
    /// Search for a move on the mirrored board
    Compute,
    /// Report win probabilities with the worker's color to move
    Evaluate,
    /// Stop the running search; its best-so-far arrives as a `decision`
    Cancel,
    Shutdown,
}

impl Request {
    /// Decode one JSON line.
    pub fn from_json(line: &str) -> ProtocolResult<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// Worker to controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    Initialized { color: Stone },
    MoveObserved { r: u8, c: u8 },
    SearchStarted,
    Decision(MoveResult),
    /// The board is full
    NoMove,
    Evaluation(WinProbability),
    Error { message: String },
}

impl Event {
    pub fn error(err: impl std::fmt::Display) -> Self {
        Event::Error {
            message: err.to_string(),
        }
    }

    /// Encode as one JSON line (no trailing newline).
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(r#"{{"type":"error","message":"failed to encode event: {err}"}}"#)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MoveKind;
    use crate::error::ProtocolError;

    #[test]
    fn test_decode_requests() {
        assert_eq!(
            Request::from_json(r#"{"type":"init","color":"black"}"#).unwrap(),
            Request::Init {
                color: Stone::Black,
                config: None
            }
        );
        assert_eq!(
            Request::from_json(r#"{"type":"observe-move","r":3,"c":4,"color":"remove"}"#).unwrap(),
            Request::ObserveMove {
                r: 3,
                c: 4,
                color: CellChange::Remove
            }
        );
        assert_eq!(Request::from_json(" {\"type\":\"compute\"}\n").unwrap(), Request::Compute);
        assert_eq!(Request::from_json(r#"{"type":"shutdown"}"#).unwrap(), Request::Shutdown);
    }

    #[test]
    fn test_init_with_partial_config() {
        let req = Request::from_json(r#"{"type":"init","color":"white","config":{"max_depth":3}}"#).unwrap();
        let Request::Init { color, config } = req else {
            panic!("expected init, got {req:?}");
        };
        assert_eq!(color, Stone::White);
        let config = config.unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.breadth, EngineConfig::default().breadth);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(Request::from_json("not json"), Err(ProtocolError::Decode(_))));
        assert!(matches!(
            Request::from_json(r#"{"type":"launch"}"#),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_encode_events() {
        assert_eq!(Event::SearchStarted.to_json(), r#"{"type":"search-started"}"#);
        assert_eq!(Event::NoMove.to_json(), r#"{"type":"no-move"}"#);
        assert_eq!(
            Event::MoveObserved { r: 1, c: 2 }.to_json(),
            r#"{"type":"move-observed","r":1,"c":2}"#
        );

        let decision = Event::Decision(MoveResult {
            row: 7,
            col: 7,
            score: 0.0,
            kind: MoveKind::Opening,
            cancelled: false,
        });
        let json: serde_json::Value = serde_json::from_str(&decision.to_json()).unwrap();
        assert_eq!(json["type"], "decision");
        assert_eq!(json["r"], 7);
        assert_eq!(json["kind"], "opening");

        let eval = Event::Evaluation(WinProbability::black(0.75));
        let json: serde_json::Value = serde_json::from_str(&eval.to_json()).unwrap();
        assert_eq!(json["type"], "evaluation");
        assert_eq!(json["white"], 0.25);
    }
}
