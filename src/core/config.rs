//! Rule configuration.
//!
//! The distributed game has shipped with different extra-turn faces and has
//! treated redirects onto the finish square inconsistently, so those choices
//! are configuration rather than code.

use serde::{Deserialize, Serialize};

use super::board::SpecialKind;
use super::error::EngineError;
use super::rng::DIE_FACES;

/// Tunable rules for the turn engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Die face that lets the roller go again (1 by default).
    pub extra_turn_roll: u8,

    /// Does a shark that drops a piece exactly on 100 win the game?
    ///
    /// Sharks always point down, so a valid board never reaches this.
    pub descend_finish_wins: bool,

    /// Does a boat that lifts a piece exactly onto 100 win the game?
    pub ascend_finish_wins: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            extra_turn_roll: 1,
            descend_finish_wins: false,
            ascend_finish_wins: true,
        }
    }
}

impl RulesConfig {
    /// Create the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extra-turn face.
    #[must_use]
    pub fn with_extra_turn_roll(mut self, roll: u8) -> Self {
        self.extra_turn_roll = roll;
        self
    }

    /// Set whether a shark ending on 100 wins.
    #[must_use]
    pub fn with_descend_finish_wins(mut self, wins: bool) -> Self {
        self.descend_finish_wins = wins;
        self
    }

    /// Set whether a boat ending on 100 wins.
    #[must_use]
    pub fn with_ascend_finish_wins(mut self, wins: bool) -> Self {
        self.ascend_finish_wins = wins;
        self
    }

    /// Does a redirect of `kind` that ends on the finish square win?
    #[must_use]
    pub fn redirect_wins(&self, kind: SpecialKind) -> bool {
        match kind {
            SpecialKind::Descend => self.descend_finish_wins,
            SpecialKind::Ascend => self.ascend_finish_wins,
        }
    }

    /// Does this roll grant another turn?
    #[must_use]
    pub fn grants_extra_turn(&self, roll: u8) -> bool {
        roll == self.extra_turn_roll
    }

    /// Reject an extra-turn face the die cannot show.
    pub fn validate(&self) -> Result<(), EngineError> {
        if (1..=DIE_FACES).contains(&self.extra_turn_roll) {
            Ok(())
        } else {
            Err(EngineError::InvalidRoll(self.extra_turn_roll))
        }
    }
}
