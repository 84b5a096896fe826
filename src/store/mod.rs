//! Persistence collaborator: saved games and lifetime statistics.
//!
//! Storage is a plain key-value map of JSON text with three records:
//! - `gameState`: the game in progress, including the move log
//! - `gameStatistics`: the win counters
//! - `diceState`: where the seeded die left off, so rolls resume the sequence
//!
//! Backends implement the three raw operations of [`Store`]; typed loading,
//! shape validation and saving come for free. There is no schema versioning:
//! a record that no longer parses is treated as absent by the host.

mod file;
mod memory;

use thiserror::Error;

use crate::core::{GameRngState, GameState, Statistics};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key of the saved game.
pub const STATE_KEY: &str = "gameState";

/// Key of the lifetime statistics.
pub const STATISTICS_KEY: &str = "gameStatistics";

/// Key of the die checkpoint.
pub const DICE_KEY: &str = "diceState";

/// Errors from a storage backend or from a stored record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrapper around IO errors (directory creation, locking, reads, writes).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON encoding and decoding errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored record parsed but breaks a game invariant.
    #[error("invalid {key} record: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// Backend refused the operation (full, read-only, disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A key-value store of JSON text.
pub trait Store {
    /// Read the raw text stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the text stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    // === Typed records ===

    /// Load and validate the saved game.
    fn load_state(&self) -> Result<Option<GameState>, StoreError> {
        let Some(text) = self.read(STATE_KEY)? else {
            return Ok(None);
        };
        let state: GameState = serde_json::from_value(parse_object(STATE_KEY, &text)?)?;
        state.validate().map_err(|e| StoreError::Invalid {
            key: STATE_KEY,
            reason: e.to_string(),
        })?;
        Ok(Some(state))
    }

    /// Save the game.
    fn save_state(&mut self, state: &GameState) -> Result<(), StoreError> {
        let text = serde_json::to_string(state)?;
        self.write(STATE_KEY, &text)
    }

    /// Forget the saved game.
    fn clear_state(&mut self) -> Result<(), StoreError> {
        self.remove(STATE_KEY)
    }

    /// Load the saved statistics.
    fn load_statistics(&self) -> Result<Option<Statistics>, StoreError> {
        let Some(text) = self.read(STATISTICS_KEY)? else {
            return Ok(None);
        };
        let stats: Statistics = serde_json::from_value(parse_object(STATISTICS_KEY, &text)?)?;
        if stats.player1_wins.saturating_add(stats.player2_wins) > stats.total_games {
            return Err(StoreError::Invalid {
                key: STATISTICS_KEY,
                reason: "more wins than games".to_string(),
            });
        }
        Ok(Some(stats))
    }

    /// Save the statistics.
    fn save_statistics(&mut self, statistics: &Statistics) -> Result<(), StoreError> {
        let text = serde_json::to_string(statistics)?;
        self.write(STATISTICS_KEY, &text)
    }

    /// Load the die checkpoint.
    fn load_dice_state(&self) -> Result<Option<GameRngState>, StoreError> {
        let Some(text) = self.read(DICE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(parse_object(DICE_KEY, &text)?)?))
    }

    /// Save the die checkpoint.
    fn save_dice_state(&mut self, dice: &GameRngState) -> Result<(), StoreError> {
        let text = serde_json::to_string(dice)?;
        self.write(DICE_KEY, &text)
    }
}

/// Parse a record, insisting on a JSON object.
///
/// Derived `Deserialize` also accepts a struct written as a positional array,
/// which no host ever writes.
fn parse_object(key: &'static str, text: &str) -> Result<serde_json::Value, StoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(StoreError::Invalid {
            key,
            reason: "expected an object".to_string(),
        });
    }
    Ok(value)
}
