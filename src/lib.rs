//! # fishboat
//!
//! Turn engine for Fish & Boat Ladders, a two-player snakes and ladders
//! variant: sharks drag pieces down, boats carry them up.
//!
//! ## Design Principles
//!
//! 1. **Pure Resolution**: The engine holds only configuration. A turn is a
//!    function of the state, the statistics and one die face, so replays and
//!    tests are deterministic.
//!
//! 2. **Host Owns State**: Persistence, rendering and notification cues are
//!    collaborators the host wires up; the engine calls none of them.
//!
//! 3. **Configuration Over Convention**: The extra-turn face, the special
//!    squares and whether redirects onto the finish win are all data.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The move log is an `im::Vector`, so
//!   resolving a turn into a fresh state clones in O(1).
//!
//! - **Seeded Dice**: `GameRng` wraps ChaCha8 with capture/restore, and any
//!   `DiceSource` (including scripted dice) can drive a session.
//!
//! ## Modules
//!
//! - `core`: Players, board, dice, rule configuration, history, state
//! - `rules`: The turn engine
//! - `store`: Saved games and statistics (memory and file backends)
//! - `host`: Session, text renderer, notification cues
//! - `config`: The host's TOML configuration file

pub mod core;
pub mod rules;
pub mod store;
pub mod host;
pub mod config;

// Re-export commonly used types
pub use crate::core::{
    Board, DiceSource, EngineError, FixedDice, GameRng, GameRngState, GameState, MoveRecord,
    PlayerId, PlayerPair, RulesConfig, SpecialKind, SpecialSquareMap, Statistics,
};

pub use crate::rules::{Resolved, TurnEngine, TurnOutcome};

pub use crate::store::{FileStore, MemoryStore, Store, StoreError};

pub use crate::host::{Cue, Notice, NoticeKind, Renderer, Session, TextRenderer, TurnReport};
