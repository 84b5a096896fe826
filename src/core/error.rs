//! Engine error type.
//!
//! Every variant is a caller bug: the host passed a value the rules never
//! produce, or acted on a finished game. The engine reports these instead of
//! clamping.

use thiserror::Error;

/// Invalid-argument conditions raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A roll outside the faces of a six-sided die.
    #[error("invalid roll {0}: a die shows 1 to 6")]
    InvalidRoll(u8),

    /// `resolve_turn` called after someone reached the finish.
    #[error("the game is over; start a new game first")]
    GameOver,

    /// A player id other than 1 or 2.
    #[error("invalid player id {0}")]
    InvalidPlayer(u8),

    /// A square number outside the board.
    #[error("square {0} is not on the board")]
    InvalidSquare(u8),

    /// A fish/boat table that breaks the board invariants.
    #[error("invalid special squares: {0}")]
    InvalidSpecialSquares(String),

    /// An empty display name.
    #[error("player name must not be empty")]
    InvalidName,
}
