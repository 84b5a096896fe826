//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for the two seats at the board. Ids are 1-based to
//! match what players see ("Player 1", "Player 2").
//!
//! ## PlayerPair
//!
//! Fixed two-entry storage indexed by `PlayerId` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::board::Board;
use super::error::EngineError;

/// Number of seats at the board.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier: `1` or `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who opens every game.
    pub const ONE: PlayerId = PlayerId(1);

    /// The second player.
    pub const TWO: PlayerId = PlayerId(2);

    /// Create a player ID, rejecting anything outside {1, 2}.
    pub fn new(id: u8) -> Result<Self, EngineError> {
        match id {
            1 | 2 => Ok(Self(id)),
            other => Err(EngineError::InvalidPlayer(other)),
        }
    }

    /// Get the raw 1-based id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Get the 0-based storage index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The opponent of this player.
    #[must_use]
    pub const fn other(self) -> PlayerId {
        if self.0 == 1 {
            PlayerId::TWO
        } else {
            PlayerId::ONE
        }
    }

    /// Iterate over both player IDs in seat order.
    ///
    /// ```
    /// use fishboat::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::ONE, PlayerId::TWO]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::ONE, PlayerId::TWO].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PlayerId::new(value)
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seat at the board: identity, display name and current square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Current square, always within `1..=100`.
    pub position: u8,
}

impl Player {
    /// Create a player standing on the start square with the default name.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            name: default_name(id),
            position: Board::START,
        }
    }

    /// Builder-style name override.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Default display name for a seat ("Player 1", "Player 2").
#[must_use]
pub fn default_name(id: PlayerId) -> String {
    id.to_string()
}

/// Per-player data with O(1) access by `PlayerId`.
///
/// ## Example
///
/// ```
/// use fishboat::core::{PlayerId, PlayerPair};
///
/// let mut wins: PlayerPair<u32> = PlayerPair::new(|_| 0);
/// wins[PlayerId::TWO] += 1;
/// assert_eq!(wins[PlayerId::ONE], 0);
/// assert_eq!(wins[PlayerId::TWO], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerPair<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerPair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.get(), 1);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(format!("{}", PlayerId::TWO), "Player 2");
        assert_eq!(PlayerId::ONE.other(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.other(), PlayerId::ONE);
    }

    #[test]
    fn test_player_id_rejects_unknown_seats() {
        assert_eq!(PlayerId::new(0), Err(EngineError::InvalidPlayer(0)));
        assert_eq!(PlayerId::new(3), Err(EngineError::InvalidPlayer(3)));
        assert_eq!(PlayerId::new(2), Ok(PlayerId::TWO));
    }

    #[test]
    fn test_player_id_serde_is_numeric() {
        let json = serde_json::to_string(&PlayerId::TWO).unwrap();
        assert_eq!(json, "2");

        let parsed: PlayerId = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, PlayerId::ONE);

        assert!(serde_json::from_str::<PlayerId>("7").is_err());
    }

    #[test]
    fn test_new_player_starts_on_square_one() {
        let player = Player::new(PlayerId::TWO);
        assert_eq!(player.position, 1);
        assert_eq!(player.name, "Player 2");

        let named = Player::new(PlayerId::ONE).with_name("Nemo");
        assert_eq!(named.name, "Nemo");
    }

    #[test]
    fn test_player_pair_factory_and_mutation() {
        let mut pair: PlayerPair<u8> = PlayerPair::new(|p| p.get() * 10);
        assert_eq!(pair[PlayerId::ONE], 10);
        assert_eq!(pair[PlayerId::TWO], 20);

        pair[PlayerId::ONE] = 5;
        assert_eq!(pair[PlayerId::ONE], 5);

        let pairs: Vec<_> = pair.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::ONE, &5), (PlayerId::TWO, &20)]);
    }
}
