//! Host side of the game: the live session, its presentation and cues.

pub mod cues;
pub mod renderer;
pub mod session;

pub use cues::{cues_for, Cue, TurnCues};
pub use renderer::{status_line, Renderer, TextRenderer, LOOKAHEAD_RANGE};
pub use session::{Notice, NoticeKind, Session, TurnReport};
