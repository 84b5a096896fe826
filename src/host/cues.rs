//! Notification cues derived from a resolved turn.
//!
//! A cue says *that* something noteworthy happened; sound, animation or a
//! toast is up to whoever consumes it.

use smallvec::SmallVec;

use crate::core::SpecialKind;
use crate::rules::TurnOutcome;

/// Something a notification or sound layer may react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The die was rolled.
    DiceRoll,
    /// A shark dragged a piece down.
    FishBite,
    /// A boat lifted a piece up.
    BoatRescue,
    /// Someone won.
    Victory,
    /// The roller goes again.
    ExtraTurn,
}

/// Cues for one turn, in the order they should fire.
pub type TurnCues = SmallVec<[Cue; 4]>;

/// Build the cue list for a turn.
///
/// `boat_to_finish` marks a win that came off a boat, which also plays the
/// rescue cue before the victory.
#[must_use]
pub fn cues_for(outcome: &TurnOutcome, extra_turn: bool, boat_to_finish: bool) -> TurnCues {
    let mut cues = TurnCues::new();
    cues.push(Cue::DiceRoll);

    match outcome {
        TurnOutcome::Redirected {
            kind: SpecialKind::Descend,
            ..
        } => cues.push(Cue::FishBite),
        TurnOutcome::Redirected {
            kind: SpecialKind::Ascend,
            ..
        } => cues.push(Cue::BoatRescue),
        TurnOutcome::Win { .. } => {
            if boat_to_finish {
                cues.push(Cue::BoatRescue);
            }
            cues.push(Cue::Victory);
        }
        TurnOutcome::Moved { .. } | TurnOutcome::Overshoot { .. } => {}
    }

    if extra_turn {
        cues.push(Cue::ExtraTurn);
    }
    cues
}
