//! Game state and lifetime statistics.
//!
//! ## GameState
//!
//! Everything about one game in progress:
//! - Whose turn it is and whether they earned an extra roll
//! - Both pieces and their names
//! - Whether someone has finished
//! - The move log for this session
//!
//! ## Statistics
//!
//! Win counters that outlive any single game. Only a win touches them.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::error::EngineError;
use super::history::{MoveRecord, SpecialEffect};
use super::player::{Player, PlayerId, PlayerPair};
use super::rng::DIE_FACES;

/// State of one game.
///
/// The move log is an `im::Vector`, so cloning a state to produce the next
/// one is O(1) in the length of the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Player whose roll is next.
    pub current_player_id: PlayerId,

    /// Both seats, indexed by `PlayerId`.
    pub players: PlayerPair<Player>,

    /// Set once a piece reaches the finish.
    pub is_game_over: bool,

    /// The last roll was the extra-turn face; the same player rolls again.
    pub extra_turn_pending: bool,

    /// Moves made this game, oldest first.
    #[serde(default)]
    pub move_log: Vector<MoveRecord>,
}

impl GameState {
    /// Fresh game: both pieces on square 1, player 1 to roll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_player_id: PlayerId::ONE,
            players: PlayerPair::new(Player::new),
            is_game_over: false,
            extra_turn_pending: false,
            move_log: Vector::new(),
        }
    }

    /// Fresh game that keeps the given display names.
    #[must_use]
    pub fn with_names(names: &PlayerPair<String>) -> Self {
        Self {
            players: PlayerPair::new(|id| Player::new(id).with_name(names[id].clone())),
            ..Self::new()
        }
    }

    /// Current display names.
    #[must_use]
    pub fn names(&self) -> PlayerPair<String> {
        PlayerPair::new(|id| self.players[id].name.clone())
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Get the player whose roll is next.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_id]
    }

    /// The player standing on the finish, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_game_over {
            return None;
        }
        self.players
            .iter()
            .find(|(_, p)| p.position == Board::FINISH)
            .map(|(id, _)| id)
    }

    /// Has anything happened yet? (A restored game worth announcing.)
    #[must_use]
    pub fn has_progress(&self) -> bool {
        !self.move_log.is_empty() || self.players.values().any(|p| p.position > Board::START)
    }

    /// Change a player's display name.
    ///
    /// Surrounding whitespace is trimmed; an empty result is rejected.
    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName);
        }
        self.players[id].name = name.to_string();
        Ok(())
    }

    /// Check structural invariants (used when restoring saved games).
    pub fn validate(&self) -> Result<(), EngineError> {
        for (seat, player) in self.players.iter() {
            if player.id != seat {
                return Err(EngineError::InvalidPlayer(player.id.get()));
            }
            if !Board::contains(player.position) {
                return Err(EngineError::InvalidSquare(player.position));
            }
        }
        if self.is_game_over && self.winner().is_none() {
            return Err(EngineError::InvalidSquare(self.current_player().position));
        }
        for record in &self.move_log {
            if !(1..=DIE_FACES).contains(&record.roll) {
                return Err(EngineError::InvalidRoll(record.roll));
            }
            let landed = record.special.map(|s| s.resulting_square);
            for square in [Some(record.from), Some(record.to), landed].into_iter().flatten() {
                if !Board::contains(square) {
                    return Err(EngineError::InvalidSquare(square));
                }
            }
        }
        Ok(())
    }

    // === Move Log ===

    /// Moves made this game, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.move_log
    }

    /// Most recent move.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_log.last()
    }

    /// Append a move.
    pub(crate) fn record_move(&mut self, record: MoveRecord) {
        self.move_log.push_back(record);
    }

    /// Attach the redirect of this turn to the latest move.
    pub(crate) fn attach_special(&mut self, effect: SpecialEffect) {
        if let Some(last) = self.move_log.back_mut() {
            last.special = Some(effect);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifetime win counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub total_games: u32,
}

impl Statistics {
    /// All counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for a player.
    #[must_use]
    pub fn wins(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::ONE => self.player1_wins,
            _ => self.player2_wins,
        }
    }

    /// Count a finished game won by `player`.
    pub(crate) fn record_win(&mut self, player: PlayerId) {
        match player {
            PlayerId::ONE => self.player1_wins += 1,
            _ => self.player2_wins += 1,
        }
        self.total_games += 1;
    }
}
