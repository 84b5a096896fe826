//! The turn engine: one die roll in, one new state and outcome out.
//!
//! Resolution order for a roll `r` by the current player at square `p`:
//! 1. `p + r > 100`: the piece stays put (overshoot).
//! 2. Otherwise the piece moves and the move is logged.
//! 3. Landing exactly on 100 wins; special squares are not consulted.
//! 4. Otherwise a fish or boat on the landing square redirects the piece
//!    once. Its destination is never looked up again.
//! 5. Unless the game ended, rolling the extra-turn face keeps the turn;
//!    any other face passes it.
//!
//! Resolution is synchronous. Hosts that animate a turn stage the reveal
//! from the returned [`TurnOutcome`] after the fact.

use log::{debug, info};

use crate::core::{
    Board, DiceSource, EngineError, GameState, MoveRecord, PlayerId, PlayerPair, RulesConfig,
    SpecialEffect, SpecialKind, Statistics, DIE_FACES,
};

/// What a single roll did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Plain move to `to`.
    Moved { to: u8 },
    /// The roll would pass the finish; `needed` is the exact roll required.
    Overshoot { needed: u8 },
    /// Landed on a fish or boat and ended on `to`.
    Redirected { kind: SpecialKind, to: u8 },
    /// `player` reached the finish and the game is over.
    Win { player: PlayerId },
}

impl TurnOutcome {
    /// Did this roll end the game?
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, TurnOutcome::Win { .. })
    }
}

/// Result of resolving a turn without touching the inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub state: GameState,
    pub statistics: Statistics,
    pub outcome: TurnOutcome,
}

/// Applies the rules of Fish & Boat Ladders to a [`GameState`].
///
/// The engine holds only immutable configuration. The host owns the live
/// state and statistics and passes them in on every call.
///
/// ## Example
///
/// ```
/// use fishboat::core::{GameState, PlayerId, Statistics};
/// use fishboat::rules::{TurnEngine, TurnOutcome};
///
/// let engine = TurnEngine::classic();
/// let mut state = engine.new_game();
/// let mut stats = Statistics::new();
///
/// let outcome = engine.apply_turn(&mut state, &mut stats, 3).unwrap();
/// assert_eq!(outcome, TurnOutcome::Moved { to: 4 });
/// assert_eq!(state.current_player_id, PlayerId::TWO);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TurnEngine {
    board: Board,
    rules: RulesConfig,
}

impl TurnEngine {
    /// Create an engine, checking the board and rules.
    pub fn new(board: Board, rules: RulesConfig) -> Result<Self, EngineError> {
        board.specials().validate()?;
        rules.validate()?;
        Ok(Self { board, rules })
    }

    /// Classic board with default rules.
    #[must_use]
    pub fn classic() -> Self {
        Self::default()
    }

    /// Get the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the rules.
    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Roll the die.
    pub fn roll_die<D: DiceSource + ?Sized>(&self, dice: &mut D) -> u8 {
        dice.roll_die()
    }

    /// A fresh game with default names.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new()
    }

    /// A fresh game that keeps the players' chosen names.
    #[must_use]
    pub fn new_game_with_names(&self, names: &PlayerPair<String>) -> GameState {
        GameState::with_names(names)
    }

    /// Zeroed statistics.
    #[must_use]
    pub fn clear_statistics(&self) -> Statistics {
        Statistics::new()
    }

    /// Resolve a roll into a new state, leaving the inputs untouched.
    pub fn resolve_turn(
        &self,
        state: &GameState,
        statistics: &Statistics,
        roll: u8,
    ) -> Result<Resolved, EngineError> {
        let mut next = state.clone();
        let mut next_stats = *statistics;
        let outcome = self.apply_turn(&mut next, &mut next_stats, roll)?;
        Ok(Resolved {
            state: next,
            statistics: next_stats,
            outcome,
        })
    }

    /// Resolve a roll in place.
    ///
    /// Fails without modifying anything if the roll is not a die face or the
    /// game is already over.
    pub fn apply_turn(
        &self,
        state: &mut GameState,
        statistics: &mut Statistics,
        roll: u8,
    ) -> Result<TurnOutcome, EngineError> {
        if !(1..=DIE_FACES).contains(&roll) {
            return Err(EngineError::InvalidRoll(roll));
        }
        self.advance(state, statistics, roll)
    }

    /// Roll `dice` and apply the result. Returns the roll with its outcome.
    pub fn play_turn<D: DiceSource + ?Sized>(
        &self,
        state: &mut GameState,
        statistics: &mut Statistics,
        dice: &mut D,
    ) -> Result<(u8, TurnOutcome), EngineError> {
        if state.is_game_over {
            return Err(EngineError::GameOver);
        }
        let roll = self.roll_die(dice);
        let outcome = self.apply_turn(state, statistics, roll)?;
        Ok((roll, outcome))
    }

    /// Move the current player `steps` squares and settle the turn.
    ///
    /// `steps` is not range-checked here.
    fn advance(
        &self,
        state: &mut GameState,
        statistics: &mut Statistics,
        steps: u8,
    ) -> Result<TurnOutcome, EngineError> {
        if state.is_game_over {
            return Err(EngineError::GameOver);
        }

        let mover = state.current_player_id;
        let from = state.players[mover].position;
        let target = u16::from(from) + u16::from(steps);

        if target > u16::from(Board::FINISH) {
            let needed = Board::FINISH.saturating_sub(from);
            debug!("{mover} rolled {steps} from {from}: overshoot, needs exactly {needed}");
            self.settle_turn(state, steps);
            return Ok(TurnOutcome::Overshoot { needed });
        }

        // target <= 100 here
        let target = target as u8;
        state.players[mover].position = target;
        state.record_move(MoveRecord::new(mover, steps, from, target));

        if target == Board::FINISH {
            return Ok(self.finish(state, statistics, mover));
        }

        let outcome = match self.board.specials().lookup(target) {
            Some((kind, to)) => {
                state.players[mover].position = to;
                state.attach_special(SpecialEffect {
                    kind,
                    resulting_square: to,
                });
                debug!("{mover} rolled {steps}: {from} -> {target}, {kind} to {to}");

                if to == Board::FINISH && self.rules.redirect_wins(kind) {
                    return Ok(self.finish(state, statistics, mover));
                }
                TurnOutcome::Redirected { kind, to }
            }
            None => {
                debug!("{mover} rolled {steps}: {from} -> {target}");
                TurnOutcome::Moved { to: target }
            }
        };

        self.settle_turn(state, steps);
        Ok(outcome)
    }

    /// Mark `winner` as finished and count the game.
    fn finish(
        &self,
        state: &mut GameState,
        statistics: &mut Statistics,
        winner: PlayerId,
    ) -> TurnOutcome {
        state.is_game_over = true;
        state.extra_turn_pending = false;
        statistics.record_win(winner);
        info!(
            "{} ({winner}) wins after {} moves",
            state.players[winner].name,
            state.move_log.len()
        );
        TurnOutcome::Win { player: winner }
    }

    /// Keep or pass the turn depending on the rolled face.
    fn settle_turn(&self, state: &mut GameState, roll: u8) {
        state.extra_turn_pending = self.rules.grants_extra_turn(roll);
        if state.extra_turn_pending {
            debug!("{} rolled {roll} and goes again", state.current_player_id);
        } else {
            state.current_player_id = state.current_player_id.other();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedDice, SpecialSquareMap};

    fn state_at(player: PlayerId, position: u8) -> GameState {
        let mut state = GameState::new();
        state.current_player_id = player;
        state.players[player].position = position;
        state
    }

    #[test]
    fn test_plain_move_passes_turn() {
        let engine = TurnEngine::classic();
        let mut state = GameState::new();
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 3).unwrap();

        assert_eq!(outcome, TurnOutcome::Moved { to: 4 });
        assert_eq!(state.player(PlayerId::ONE).position, 4);
        assert_eq!(state.current_player_id, PlayerId::TWO);
        assert!(!state.extra_turn_pending);

        let record = state.last_move().unwrap();
        assert_eq!((record.player, record.roll, record.from, record.to), (PlayerId::ONE, 3, 1, 4));
        assert_eq!(record.special, None);
    }

    #[test]
    fn test_overshoot_keeps_position() {
        let engine = TurnEngine::classic();
        let mut state = state_at(PlayerId::ONE, 97);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 4).unwrap();

        assert_eq!(outcome, TurnOutcome::Overshoot { needed: 3 });
        assert_eq!(state.player(PlayerId::ONE).position, 97);
        assert_eq!(state.current_player_id, PlayerId::TWO);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_overshoot_on_extra_turn_face_keeps_turn() {
        let engine =
            TurnEngine::new(Board::default(), RulesConfig::new().with_extra_turn_roll(6)).unwrap();
        let mut state = state_at(PlayerId::TWO, 96);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 6).unwrap();

        assert_eq!(outcome, TurnOutcome::Overshoot { needed: 4 });
        assert_eq!(state.current_player_id, PlayerId::TWO);
        assert!(state.extra_turn_pending);
    }

    #[test]
    fn test_exact_landing_wins() {
        let engine = TurnEngine::classic();
        let mut state = state_at(PlayerId::TWO, 99);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 1).unwrap();

        assert_eq!(outcome, TurnOutcome::Win { player: PlayerId::TWO });
        assert!(state.is_game_over);
        assert!(!state.extra_turn_pending);
        assert_eq!(state.winner(), Some(PlayerId::TWO));
        assert_eq!(stats.player2_wins, 1);
        assert_eq!(stats.player1_wins, 0);
        assert_eq!(stats.total_games, 1);
    }

    #[test]
    fn test_descend_redirect_from_forty() {
        // 40 + 9 lands on the 49 shark; only the internal step allows 9.
        let engine = TurnEngine::classic();
        let mut state = state_at(PlayerId::ONE, 40);
        let mut stats = Statistics::new();

        let outcome = engine.advance(&mut state, &mut stats, 9).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Redirected {
                kind: SpecialKind::Descend,
                to: 11
            }
        );
        assert_eq!(state.player(PlayerId::ONE).position, 11);
        let record = state.last_move().unwrap();
        assert_eq!(record.to, 49);
        assert_eq!(
            record.special,
            Some(SpecialEffect {
                kind: SpecialKind::Descend,
                resulting_square: 11
            })
        );
    }

    #[test]
    fn test_ascend_redirect_does_not_win() {
        let engine =
            TurnEngine::new(Board::default(), RulesConfig::new().with_extra_turn_roll(6)).unwrap();
        let mut state = state_at(PlayerId::ONE, 70);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 1).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Redirected {
                kind: SpecialKind::Ascend,
                to: 91
            }
        );
        assert!(!state.is_game_over);
        assert_eq!(state.current_player_id, PlayerId::TWO);
        assert_eq!(stats, Statistics::new());
    }

    #[test]
    fn test_redirect_is_not_chained() {
        // Shark 50 -> 30 lands on a boat square; the boat must not fire.
        let specials = SpecialSquareMap::new([(50, 30)], [(30, 60)]).unwrap();
        let engine = TurnEngine::new(Board::new(specials), RulesConfig::default()).unwrap();
        let mut state = state_at(PlayerId::ONE, 46);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 4).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Redirected {
                kind: SpecialKind::Descend,
                to: 30
            }
        );
        assert_eq!(state.player(PlayerId::ONE).position, 30);
    }

    #[test]
    fn test_boat_to_finish_wins_by_default() {
        let specials = SpecialSquareMap::new([], [(80, 100)]).unwrap();
        let engine = TurnEngine::new(Board::new(specials), RulesConfig::default()).unwrap();
        let mut state = state_at(PlayerId::ONE, 77);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 3).unwrap();

        assert_eq!(outcome, TurnOutcome::Win { player: PlayerId::ONE });
        assert!(state.is_game_over);
        assert_eq!(stats.player1_wins, 1);
        assert_eq!(
            state.last_move().unwrap().special,
            Some(SpecialEffect {
                kind: SpecialKind::Ascend,
                resulting_square: 100
            })
        );
    }

    #[test]
    fn test_boat_to_finish_without_win_rule() {
        let specials = SpecialSquareMap::new([], [(80, 100)]).unwrap();
        let rules = RulesConfig::new().with_ascend_finish_wins(false);
        let engine = TurnEngine::new(Board::new(specials), rules).unwrap();
        let mut state = state_at(PlayerId::ONE, 77);
        let mut stats = Statistics::new();

        let outcome = engine.apply_turn(&mut state, &mut stats, 3).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Redirected {
                kind: SpecialKind::Ascend,
                to: 100
            }
        );
        assert!(!state.is_game_over);
        assert_eq!(stats.total_games, 0);
        assert_eq!(state.current_player_id, PlayerId::TWO);
    }

    #[test]
    fn test_extra_turn_retained_then_cleared() {
        let engine = TurnEngine::classic();
        let mut state = GameState::new();
        let mut stats = Statistics::new();
        state.players[PlayerId::ONE].position = 10;

        engine.apply_turn(&mut state, &mut stats, 1).unwrap();
        assert_eq!(state.current_player_id, PlayerId::ONE);
        assert!(state.extra_turn_pending);

        engine.apply_turn(&mut state, &mut stats, 3).unwrap();
        assert_eq!(state.current_player_id, PlayerId::TWO);
        assert!(!state.extra_turn_pending);
    }

    #[test]
    fn test_rejects_bad_roll_without_mutation() {
        let engine = TurnEngine::classic();
        let mut state = GameState::new();
        let mut stats = Statistics::new();

        assert_eq!(engine.apply_turn(&mut state, &mut stats, 0), Err(EngineError::InvalidRoll(0)));
        assert_eq!(engine.apply_turn(&mut state, &mut stats, 7), Err(EngineError::InvalidRoll(7)));
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_rejects_turn_after_game_over() {
        let engine = TurnEngine::classic();
        let mut state = state_at(PlayerId::ONE, 99);
        let mut stats = Statistics::new();
        engine.apply_turn(&mut state, &mut stats, 1).unwrap();

        assert_eq!(engine.apply_turn(&mut state, &mut stats, 2), Err(EngineError::GameOver));
        assert_eq!(stats.total_games, 1);

        let mut dice = FixedDice::new([4]);
        assert_eq!(engine.play_turn(&mut state, &mut stats, &mut dice), Err(EngineError::GameOver));
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_resolve_turn_is_pure() {
        let engine = TurnEngine::classic();
        let state = state_at(PlayerId::ONE, 99);
        let stats = Statistics::new();

        let resolved = engine.resolve_turn(&state, &stats, 1).unwrap();

        assert_eq!(resolved.outcome, TurnOutcome::Win { player: PlayerId::ONE });
        assert!(resolved.state.is_game_over);
        assert_eq!(resolved.statistics.total_games, 1);

        assert!(!state.is_game_over);
        assert_eq!(stats.total_games, 0);
    }

    #[test]
    fn test_play_turn_uses_dice() {
        let engine = TurnEngine::classic();
        let mut state = GameState::new();
        let mut stats = Statistics::new();
        let mut dice = FixedDice::new([1, 5]);

        // 1 + 1 = 2 is a boat to 38, and 1 is the extra-turn face.
        let (roll, outcome) = engine.play_turn(&mut state, &mut stats, &mut dice).unwrap();
        assert_eq!(roll, 1);
        assert_eq!(
            outcome,
            TurnOutcome::Redirected {
                kind: SpecialKind::Ascend,
                to: 38
            }
        );
        assert_eq!(state.current_player_id, PlayerId::ONE);

        let (roll, outcome) = engine.play_turn(&mut state, &mut stats, &mut dice).unwrap();
        assert_eq!(roll, 5);
        assert_eq!(outcome, TurnOutcome::Moved { to: 43 });
        assert_eq!(state.current_player_id, PlayerId::TWO);
    }

    #[test]
    fn test_new_game_and_clear_statistics() {
        let engine = TurnEngine::classic();
        assert_eq!(engine.new_game(), engine.new_game());
        assert_eq!(engine.clear_statistics(), Statistics::new());

        let mut names = PlayerPair::new(|id| id.to_string());
        names[PlayerId::ONE] = "Marlin".to_string();
        let state = engine.new_game_with_names(&names);
        assert_eq!(state.player(PlayerId::ONE).name, "Marlin");
        assert!(!state.has_progress());
    }

    #[test]
    fn test_engine_rejects_bad_rules() {
        let err = TurnEngine::new(Board::default(), RulesConfig::new().with_extra_turn_roll(9))
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidRoll(9));
    }
}
