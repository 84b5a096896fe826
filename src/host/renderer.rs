//! Presentation of the board, turns and notices.
//!
//! The engine never draws anything. Hosts pick a [`Renderer`]; the crate
//! ships a plain-text one for terminals and tests.

use std::io::{self, Write};

use super::session::{Notice, NoticeKind, TurnReport};
use crate::core::{dice_face, Board, GameState, PlayerId, SpecialKind, Statistics};
use crate::rules::TurnOutcome;

/// How far ahead of the leading piece fish and boats are highlighted.
pub const LOOKAHEAD_RANGE: u8 = 20;

/// Something that can show the game to the players.
pub trait Renderer {
    /// Draw the whole board with both pieces and the scoreboard.
    fn render(
        &mut self,
        board: &Board,
        state: &GameState,
        statistics: &Statistics,
    ) -> io::Result<()>;

    /// Announce one resolved roll. `state` is the state after the roll.
    fn show_turn(&mut self, report: &TurnReport, state: &GameState) -> io::Result<()>;

    /// Show a transient notice.
    fn show_notice(&mut self, notice: &Notice) -> io::Result<()>;

    /// List the moves of the current game, newest first.
    fn show_history(&mut self, state: &GameState) -> io::Result<()>;
}

/// Renders to any [`Write`] as plain text.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Take back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_grid(&mut self, board: &Board, state: &GameState) -> io::Result<()> {
        let width = usize::from(Board::GRID_WIDTH);
        let mut grid = vec![[0u8; Board::GRID_WIDTH as usize]; width];
        for square in Board::START..=Board::FINISH {
            if let Ok((row, col)) = Board::grid_position(square) {
                grid[usize::from(row)][usize::from(col)] = square;
            }
        }

        let rule = format!("+{}", "----+".repeat(width));
        writeln!(self.out, "{rule}")?;
        for row in &grid {
            write!(self.out, "|")?;
            for &square in row {
                write!(self.out, "{}|", cell(board, state, square))?;
            }
            writeln!(self.out)?;
            writeln!(self.out, "{rule}")?;
        }
        Ok(())
    }
}

/// Four-character cell: the pieces on the square, or its number with a
/// `v` for a shark and `^` for a boat.
fn cell(board: &Board, state: &GameState, square: u8) -> String {
    let on_square = |id: PlayerId| state.player(id).position == square;
    match (on_square(PlayerId::ONE), on_square(PlayerId::TWO)) {
        (true, true) => "P1P2".to_string(),
        (true, false) => " P1 ".to_string(),
        (false, true) => " P2 ".to_string(),
        (false, false) => {
            let marker = match board.specials().lookup(square) {
                Some((SpecialKind::Descend, _)) => 'v',
                Some((SpecialKind::Ascend, _)) => '^',
                None => ' ',
            };
            format!("{square:>3}{marker}")
        }
    }
}

/// The status message for a resolved roll.
#[must_use]
pub fn status_line(report: &TurnReport, state: &GameState) -> String {
    let name = &state.player(report.player).name;
    let line = match report.outcome {
        TurnOutcome::Win { player } => {
            return format!("🎉 {} WINS! 🏆 Congratulations!", state.player(player).name);
        }
        TurnOutcome::Overshoot { needed } => format!("🎯 {name} needs exactly {needed} to win!"),
        TurnOutcome::Redirected {
            kind: SpecialKind::Descend,
            to,
        } => format!("🦈 Oh no! {name} got caught by a shark! Dragged down to square {to}!"),
        TurnOutcome::Redirected {
            kind: SpecialKind::Ascend,
            to,
        } => format!("⛵ Great! {name} found a boat ladder! Sailing up to square {to}!"),
        TurnOutcome::Moved { .. } if report.extra_turn => {
            return format!("🎲 {name} rolled a {}! Roll again!", report.roll);
        }
        TurnOutcome::Moved { .. } => {
            return format!("🎮 {}'s turn to roll!", state.current_player().name);
        }
    };
    if report.extra_turn {
        format!("{line} 🎲 Roll again!")
    } else {
        line
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(
        &mut self,
        board: &Board,
        state: &GameState,
        statistics: &Statistics,
    ) -> io::Result<()> {
        self.write_grid(board, state)?;

        for (id, player) in state.players.iter() {
            writeln!(self.out, "P{} {:<16} square {:>3}", id.get(), player.name, player.position)?;
        }

        match state.winner() {
            Some(id) => writeln!(self.out, "Winner: {}", state.player(id).name)?,
            None => writeln!(self.out, "Next: {}", state.current_player().name)?,
        }

        let leader = state
            .players
            .values()
            .map(|p| p.position)
            .max()
            .unwrap_or(Board::START);
        let ahead = board.specials_ahead(leader, LOOKAHEAD_RANGE);
        if !ahead.is_empty() && !state.is_game_over {
            let listed: Vec<String> = ahead
                .iter()
                .map(|(from, kind, to)| format!("{kind} {from}→{to}"))
                .collect();
            writeln!(self.out, "Ahead: {}", listed.join(", "))?;
        }

        writeln!(
            self.out,
            "Wins: {} {} | {} {} | games {}",
            state.player(PlayerId::ONE).name,
            statistics.player1_wins,
            state.player(PlayerId::TWO).name,
            statistics.player2_wins,
            statistics.total_games
        )
    }

    fn show_turn(&mut self, report: &TurnReport, state: &GameState) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}",
            dice_face(report.roll),
            status_line(report, state)
        )
    }

    fn show_notice(&mut self, notice: &Notice) -> io::Result<()> {
        let tag = match notice.kind {
            NoticeKind::Restored => "welcome back",
            NoticeKind::Storage => "storage",
        };
        writeln!(self.out, "[{tag}] {}", notice.message)
    }

    fn show_history(&mut self, state: &GameState) -> io::Result<()> {
        if state.move_log.is_empty() {
            return writeln!(self.out, "No moves yet.");
        }
        for record in state.move_log.iter().rev() {
            writeln!(
                self.out,
                "{} {:<16} {}",
                record.timestamp.format("%H:%M:%S"),
                state.player(record.player).name,
                record.describe()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::cues::cues_for;

    fn report(player: PlayerId, roll: u8, outcome: TurnOutcome, extra_turn: bool) -> TurnReport {
        TurnReport {
            player,
            roll,
            outcome,
            extra_turn,
            cues: cues_for(&outcome, extra_turn, false),
        }
    }

    fn rendered(state: &GameState) -> String {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render(&Board::default(), state, &Statistics::new())
            .unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_grid_shape() {
        let text = rendered(&GameState::new());
        let lines: Vec<&str> = text.lines().collect();

        // 10 rows, each framed by rules.
        assert_eq!(lines[0], lines[2]);
        assert!(lines[1].starts_with("|100 |"));
        // Both pieces start on square 1, bottom left.
        assert!(lines[19].starts_with("|P1P2|  2^|"));
        assert!(lines[20].starts_with("+----+"));
    }

    #[test]
    fn test_markers_and_pieces() {
        let mut state = GameState::new();
        state.players[PlayerId::ONE].position = 45;

        let text = rendered(&state);
        assert!(text.contains(" P1 "));
        assert!(text.contains(" 98v"));
        assert!(text.contains(" 78^"));
        assert!(text.contains(
            "Ahead: shark 47→26, shark 49→11, boat 51→67, shark 56→53, shark 62→19, shark 64→60"
        ));
        assert!(text.contains("Next: Player 1"));
    }

    #[test]
    fn test_status_lines() {
        let mut state = GameState::new();
        state.current_player_id = PlayerId::TWO;

        let moved = report(PlayerId::ONE, 3, TurnOutcome::Moved { to: 4 }, false);
        assert_eq!(status_line(&moved, &state), "🎮 Player 2's turn to roll!");

        let again = report(PlayerId::ONE, 1, TurnOutcome::Moved { to: 5 }, true);
        assert_eq!(status_line(&again, &state), "🎲 Player 1 rolled a 1! Roll again!");

        let short = report(PlayerId::ONE, 4, TurnOutcome::Overshoot { needed: 3 }, false);
        assert_eq!(status_line(&short, &state), "🎯 Player 1 needs exactly 3 to win!");

        let shark = TurnOutcome::Redirected {
            kind: SpecialKind::Descend,
            to: 11,
        };
        assert_eq!(
            status_line(&report(PlayerId::ONE, 6, shark, false), &state),
            "🦈 Oh no! Player 1 got caught by a shark! Dragged down to square 11!"
        );

        let boat = TurnOutcome::Redirected {
            kind: SpecialKind::Ascend,
            to: 91,
        };
        assert_eq!(
            status_line(&report(PlayerId::ONE, 1, boat, true), &state),
            "⛵ Great! Player 1 found a boat ladder! Sailing up to square 91! 🎲 Roll again!"
        );
    }

    #[test]
    fn test_win_line_and_turn() {
        let mut state = GameState::new();
        state.rename_player(PlayerId::TWO, "Dory").unwrap();
        let won = report(PlayerId::TWO, 2, TurnOutcome::Win { player: PlayerId::TWO }, false);

        let mut renderer = TextRenderer::new(Vec::new());
        renderer.show_turn(&won, &state).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "⚁ 🎉 Dory WINS! 🏆 Congratulations!\n");
    }

    #[test]
    fn test_history_and_notices() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.show_history(&GameState::new()).unwrap();
        renderer
            .show_notice(&Notice {
                kind: NoticeKind::Storage,
                message: "disk full".to_string(),
            })
            .unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "No moves yet.\n[storage] disk full\n");
    }
}
