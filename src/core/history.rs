//! Move history: one record per roll that moved a piece.
//!
//! The log is append-only. The single exception is attaching the redirect
//! that a landing square caused to the record of that same landing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::board::SpecialKind;
use super::player::PlayerId;

/// A fish or boat that fired after a landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialEffect {
    pub kind: SpecialKind,
    /// Square the piece ended on after the redirect.
    pub resulting_square: u8,
}

/// A recorded move.
///
/// Used for:
/// - the history panel shown to players
/// - replay/debugging of a saved session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who rolled.
    pub player: PlayerId,

    /// Die value.
    pub roll: u8,

    /// Square before the roll.
    pub from: u8,

    /// Square the roll landed on, before any redirect.
    pub to: u8,

    /// Redirect triggered by `to`, if any.
    #[serde(default)]
    pub special: Option<SpecialEffect>,

    /// When the move was made.
    pub timestamp: DateTime<Utc>,
}

impl MoveRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(player: PlayerId, roll: u8, from: u8, to: u8) -> Self {
        Self::at(player, roll, from, to, Utc::now())
    }

    /// Create a record with an explicit timestamp.
    #[must_use]
    pub fn at(player: PlayerId, roll: u8, from: u8, to: u8, timestamp: DateTime<Utc>) -> Self {
        Self {
            player,
            roll,
            from,
            to,
            special: None,
            timestamp,
        }
    }

    /// Square the piece finished the turn on.
    #[must_use]
    pub fn final_square(&self) -> u8 {
        self.special.map_or(self.to, |s| s.resulting_square)
    }

    /// One-line summary for the history panel.
    ///
    /// ```
    /// use fishboat::core::{MoveRecord, PlayerId};
    ///
    /// let record = MoveRecord::new(PlayerId::ONE, 3, 4, 7);
    /// assert_eq!(record.describe(), "Rolled 3, moved from 4 to 7");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        match self.special {
            None => format!("Rolled {}, moved from {} to {}", self.roll, self.from, self.to),
            Some(SpecialEffect {
                kind: SpecialKind::Descend,
                resulting_square,
            }) => format!(
                "Rolled {}, landed on shark at {} → dragged down to {}",
                self.roll, self.to, resulting_square
            ),
            Some(SpecialEffect {
                kind: SpecialKind::Ascend,
                resulting_square,
            }) => format!(
                "Rolled {}, found boat at {} → sailed up to {}",
                self.roll, self.to, resulting_square
            ),
        }
    }
}
