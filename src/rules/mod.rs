//! Turn resolution for Fish & Boat Ladders.
//!
//! `TurnEngine` owns no game state. Hosts keep the live `GameState` and
//! `Statistics` and hand them to the engine one roll at a time.

pub mod engine;

pub use engine::{Resolved, TurnEngine, TurnOutcome};
