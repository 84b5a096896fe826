//! The board: a fixed 100-square track plus its fish and boat squares.
//!
//! Fish (sharks) drag a piece down, boats lift it up. Only the square a roll
//! lands on is looked up; the destination of a redirect is never resolved
//! again, so the tables below must not chain within one map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Direction of a special-square redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKind {
    /// Fish/shark: moves the piece to a lower square.
    Descend,
    /// Boat: moves the piece to a higher square.
    Ascend,
}

impl std::fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialKind::Descend => write!(f, "shark"),
            SpecialKind::Ascend => write!(f, "boat"),
        }
    }
}

/// Fish (descend) and boat (ascend) tables.
///
/// Invariants, checked by [`SpecialSquareMap::new`]:
/// - every key and destination is on the board;
/// - descend destinations are strictly lower, ascend strictly higher;
/// - no square is a key in both tables;
/// - no destination is a key of its own table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSquareMap {
    descend: FxHashMap<u8, u8>,
    ascend: FxHashMap<u8, u8>,
}

impl SpecialSquareMap {
    /// Build and validate a table pair.
    pub fn new(
        descend: impl IntoIterator<Item = (u8, u8)>,
        ascend: impl IntoIterator<Item = (u8, u8)>,
    ) -> Result<Self, EngineError> {
        let map = Self {
            descend: descend.into_iter().collect(),
            ascend: ascend.into_iter().collect(),
        };
        map.validate()?;
        Ok(map)
    }

    /// A board with no fish and no boats.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            descend: FxHashMap::default(),
            ascend: FxHashMap::default(),
        }
    }

    /// The layout shipped with the game.
    #[must_use]
    pub fn classic() -> Self {
        const FISH: [(u8, u8); 10] = [
            (98, 78), (95, 75), (93, 73), (87, 24), (64, 60),
            (62, 19), (56, 53), (49, 11), (47, 26), (16, 6),
        ];
        const BOATS: [(u8, u8); 10] = [
            (2, 38), (7, 14), (8, 31), (15, 26), (21, 42),
            (28, 84), (36, 44), (51, 67), (71, 91), (78, 98),
        ];

        Self {
            descend: FISH.into_iter().collect(),
            ascend: BOATS.into_iter().collect(),
        }
    }

    /// Check the table invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        let tables = [
            (SpecialKind::Descend, &self.descend),
            (SpecialKind::Ascend, &self.ascend),
        ];
        for (kind, table) in tables {
            for (&from, &to) in table {
                if !Board::contains(from) || !Board::contains(to) {
                    return Err(EngineError::InvalidSpecialSquares(format!(
                        "{kind} {from} -> {to} leaves the board"
                    )));
                }
                let direction_ok = match kind {
                    SpecialKind::Descend => to < from,
                    SpecialKind::Ascend => to > from,
                };
                if !direction_ok {
                    return Err(EngineError::InvalidSpecialSquares(format!(
                        "{kind} {from} -> {to} goes the wrong way"
                    )));
                }
                if table.contains_key(&to) {
                    return Err(EngineError::InvalidSpecialSquares(format!(
                        "{kind} {from} -> {to} lands on another {kind}"
                    )));
                }
            }
        }

        if let Some(square) = self.descend.keys().find(|k| self.ascend.contains_key(k)) {
            return Err(EngineError::InvalidSpecialSquares(format!(
                "square {square} holds both a shark and a boat"
            )));
        }

        Ok(())
    }

    /// Look up the redirect for a landing square.
    #[must_use]
    pub fn lookup(&self, square: u8) -> Option<(SpecialKind, u8)> {
        if let Some(&to) = self.descend.get(&square) {
            Some((SpecialKind::Descend, to))
        } else {
            self.ascend.get(&square).map(|&to| (SpecialKind::Ascend, to))
        }
    }

    /// Fish as `(head, tail)` pairs, ordered by head.
    #[must_use]
    pub fn descents(&self) -> Vec<(u8, u8)> {
        sorted(&self.descend)
    }

    /// Boats as `(bottom, top)` pairs, ordered by bottom.
    #[must_use]
    pub fn ascents(&self) -> Vec<(u8, u8)> {
        sorted(&self.ascend)
    }
}

impl Default for SpecialSquareMap {
    fn default() -> Self {
        Self::classic()
    }
}

fn sorted(table: &FxHashMap<u8, u8>) -> Vec<(u8, u8)> {
    let mut pairs: Vec<_> = table.iter().map(|(&k, &v)| (k, v)).collect();
    pairs.sort_unstable();
    pairs
}

/// The 10x10 track and its special squares.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    specials: SpecialSquareMap,
}

impl Board {
    /// Number of squares.
    pub const SIZE: u8 = 100;
    /// Where every piece starts.
    pub const START: u8 = 1;
    /// Landing here exactly wins.
    pub const FINISH: u8 = 100;
    /// Squares per grid row (and rows per grid).
    pub const GRID_WIDTH: u8 = 10;

    /// Create a board with the given special squares.
    #[must_use]
    pub fn new(specials: SpecialSquareMap) -> Self {
        Self { specials }
    }

    /// Get the special-square tables.
    #[must_use]
    pub fn specials(&self) -> &SpecialSquareMap {
        &self.specials
    }

    /// Is `square` on the track?
    #[must_use]
    pub const fn contains(square: u8) -> bool {
        square >= Self::START && square <= Self::FINISH
    }

    /// Grid cell `(row, col)` of a square, row 0 at the top.
    ///
    /// Square 1 sits bottom-left and the track zigzags upward: rows counted
    /// from the bottom run left to right when even, right to left when odd.
    ///
    /// ```
    /// use fishboat::core::Board;
    ///
    /// assert_eq!(Board::grid_position(1), Ok((9, 0)));
    /// assert_eq!(Board::grid_position(11), Ok((8, 9)));
    /// assert_eq!(Board::grid_position(100), Ok((0, 0)));
    /// ```
    pub fn grid_position(square: u8) -> Result<(u8, u8), EngineError> {
        if !Self::contains(square) {
            return Err(EngineError::InvalidSquare(square));
        }
        let from_bottom = (square - 1) / Self::GRID_WIDTH;
        let offset = (square - 1) % Self::GRID_WIDTH;
        let col = if from_bottom % 2 == 0 {
            offset
        } else {
            Self::GRID_WIDTH - 1 - offset
        };
        Ok((Self::GRID_WIDTH - 1 - from_bottom, col))
    }

    /// Special squares whose trigger lies in `from..=from + range`.
    ///
    /// Renderers use this to highlight the fish and boats a leading piece is
    /// about to meet.
    #[must_use]
    pub fn specials_ahead(&self, from: u8, range: u8) -> Vec<(u8, SpecialKind, u8)> {
        let end = from.saturating_add(range);
        let mut ahead: Vec<_> = self
            .specials
            .descents()
            .into_iter()
            .map(|(k, v)| (k, SpecialKind::Descend, v))
            .chain(self.specials.ascents().into_iter().map(|(k, v)| (k, SpecialKind::Ascend, v)))
            .filter(|&(k, _, _)| k >= from && k <= end)
            .collect();
        ahead.sort_unstable_by_key(|&(k, _, _)| k);
        ahead
    }
}
