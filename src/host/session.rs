//! A game session: the single live game, its statistics and their storage.
//!
//! The session is the host the engine was written for. It owns the state the
//! engine transforms, saves after every change and turns storage trouble
//! into transient notices instead of errors.

use std::collections::VecDeque;

use log::{info, warn};

use super::cues::{cues_for, TurnCues};
use crate::core::{
    Board, DiceSource, EngineError, GameState, MoveRecord, PlayerId, PlayerPair, SpecialKind,
    Statistics,
};
use crate::rules::{TurnEngine, TurnOutcome};
use crate::store::{Store, StoreError};

/// Kinds of transient notices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// A game in progress was loaded from storage.
    Restored,
    /// Storage failed; play continues but progress may not be saved.
    Storage,
}

/// A dismissable message for the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything a renderer needs to present one resolved roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Who rolled.
    pub player: PlayerId,
    /// Face shown.
    pub roll: u8,
    /// What the roll did.
    pub outcome: TurnOutcome,
    /// The same player rolls again.
    pub extra_turn: bool,
    /// Notification cues, in firing order.
    pub cues: TurnCues,
}

/// One live game bound to a store and a die.
pub struct Session<S: Store, D: DiceSource> {
    engine: TurnEngine,
    store: S,
    dice: D,
    state: GameState,
    statistics: Statistics,
    notices: VecDeque<Notice>,
}

impl<S: Store, D: DiceSource> Session<S, D> {
    /// Open a session, restoring the saved game and statistics if present.
    ///
    /// Unreadable records are discarded in favour of fresh defaults.
    pub fn open(engine: TurnEngine, store: S, dice: D) -> Self {
        let names = GameState::new().names();
        Self::open_with_names(engine, store, dice, &names)
    }

    /// Like [`Session::open`], but a fresh game gets `names`.
    ///
    /// A restored game keeps the names it was saved with.
    pub fn open_with_names(
        engine: TurnEngine,
        store: S,
        dice: D,
        names: &PlayerPair<String>,
    ) -> Self {
        let mut notices = VecDeque::new();

        let statistics = match store.load_statistics() {
            Ok(stats) => stats.unwrap_or_default(),
            Err(e) => {
                warn!("discarding saved statistics: {e}");
                notices.push_back(storage_notice(
                    "Saved statistics could not be read and were reset",
                    &e,
                ));
                Statistics::default()
            }
        };

        let state = match store.load_state() {
            Ok(Some(state)) => {
                if state.has_progress() && !state.is_game_over {
                    info!("restored game with {} moves", state.move_log.len());
                    notices.push_back(Notice {
                        kind: NoticeKind::Restored,
                        message: format!(
                            "Your previous game has been loaded. {} is up next.",
                            state.current_player().name
                        ),
                    });
                }
                state
            }
            Ok(None) => engine.new_game_with_names(names),
            Err(e) => {
                warn!("discarding saved game: {e}");
                notices.push_back(storage_notice(
                    "The saved game could not be read; starting fresh",
                    &e,
                ));
                engine.new_game_with_names(names)
            }
        };

        Self {
            engine,
            store,
            dice,
            state,
            statistics,
            notices,
        }
    }

    /// Current game.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Lifetime statistics.
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The rules in use.
    #[must_use]
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// The board in use.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// The die.
    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Is a game under way that a new game would throw away?
    #[must_use]
    pub fn game_in_progress(&self) -> bool {
        !self.state.is_game_over && self.state.has_progress()
    }

    /// Roll the session's die for the current player and resolve the turn.
    pub fn roll(&mut self) -> Result<TurnReport, EngineError> {
        if self.state.is_game_over {
            return Err(EngineError::GameOver);
        }
        let roll = self.engine.roll_die(&mut self.dice);
        self.apply_roll(roll)
    }

    /// Resolve a roll made elsewhere (a physical die, a replay).
    pub fn apply_roll(&mut self, roll: u8) -> Result<TurnReport, EngineError> {
        let player = self.state.current_player_id;
        let log_len = self.state.move_log.len();
        let outcome = self
            .engine
            .apply_turn(&mut self.state, &mut self.statistics, roll)?;

        let boat_to_finish = outcome.is_win()
            && self.state.move_log.len() > log_len
            && self
                .state
                .last_move()
                .and_then(|m| m.special)
                .is_some_and(|s| s.kind == SpecialKind::Ascend);
        let extra_turn = self.state.extra_turn_pending;

        self.persist_state();
        if outcome.is_win() {
            self.persist_statistics();
        }

        Ok(TurnReport {
            player,
            roll,
            outcome,
            extra_turn,
            cues: cues_for(&outcome, extra_turn, boat_to_finish),
        })
    }

    /// Start over, keeping player names and statistics.
    pub fn new_game(&mut self) {
        self.state = self.engine.new_game_with_names(&self.state.names());
        info!("new game started");
        self.persist_state();
    }

    /// Zero the lifetime statistics.
    pub fn clear_statistics(&mut self) {
        self.statistics = self.engine.clear_statistics();
        info!("statistics cleared");
        self.persist_statistics();
    }

    /// Rename a player and save.
    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), EngineError> {
        self.state.rename_player(id, name)?;
        self.persist_state();
        Ok(())
    }

    /// Moves of this game, newest first.
    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> {
        self.state.move_log.iter().rev()
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn persist_state(&mut self) {
        if let Err(e) = self.store.save_state(&self.state) {
            warn!("failed to save game: {e}");
            self.notices
                .push_back(storage_notice("Failed to save the game", &e));
        }
    }

    fn persist_statistics(&mut self) {
        if let Err(e) = self.store.save_statistics(&self.statistics) {
            warn!("failed to save statistics: {e}");
            self.notices
                .push_back(storage_notice("Failed to save game statistics", &e));
        }
    }
}

fn storage_notice(what: &str, error: &StoreError) -> Notice {
    Notice {
        kind: NoticeKind::Storage,
        message: format!("{what} ({error}). Your progress may not be saved."),
    }
}
