//! Action scripts: a named list of actions replayed from an empty board
//!
//! ```json
//! {
//!   "name": "opening",
//!   "actions": [
//!     { "place": { "cell": { "row": 25, "col": 25 }, "kind": "queen" } },
//!     { "place": { "cell": { "row": 24, "col": 25 }, "kind": "queen" } }
//!   ]
//! }
//! ```

use crate::board::Board;
use crate::rules::{Action, RuleViolation};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Script failure
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("action #{index} ({action}) rejected: {violation}")]
    Rejected {
        index: usize,
        action: Action,
        violation: RuleViolation,
    },
}

/// Named action list
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub name: String,
    pub actions: Vec<Action>,
}

impl Script {
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }

    /// Parse from JSON text (a bare action array is accepted too)
    pub fn from_json(content: &str) -> Result<Self, ScriptError> {
        if let Ok(actions) = serde_json::from_str::<Vec<Action>>(content) {
            return Ok(Self::new("unnamed", actions));
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        let script = Self::from_json(&content)
            .with_context(|| format!("Failed to parse script: {}", path.display()))?;
        Ok(script)
    }

    /// Replay every action on a fresh board
    pub fn replay(&self) -> Result<Board, ScriptError> {
        let mut board = Board::new();
        self.replay_onto(&mut board)?;
        Ok(board)
    }

    /// Replay onto an existing board, stopping at the first rejection.
    /// Actions before the rejected one stay applied.
    pub fn replay_onto(&self, board: &mut Board) -> Result<(), ScriptError> {
        for (index, &action) in self.actions.iter().enumerate() {
            board
                .apply(action)
                .map_err(|violation| ScriptError::Rejected {
                    index,
                    action,
                    violation,
                })?;
            tracing::trace!(index, %action, "replayed");
        }
        Ok(())
    }
}
