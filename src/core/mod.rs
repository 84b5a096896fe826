//! Core engine types: players, board, dice, configuration, history, state.
//!
//! Nothing here knows how a turn is resolved; see `rules` for that.

pub mod error;
pub mod player;
pub mod board;
pub mod rng;
pub mod config;
pub mod history;
pub mod state;

pub use error::EngineError;
pub use player::{Player, PlayerId, PlayerPair, PLAYER_COUNT};
pub use board::{Board, SpecialKind, SpecialSquareMap};
pub use rng::{dice_face, DiceSource, FixedDice, GameRng, GameRngState, DIE_FACES};
pub use config::RulesConfig;
pub use history::{MoveRecord, SpecialEffect};
pub use state::{GameState, Statistics};
