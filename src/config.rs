//! Host configuration file (`fishboat.toml`).
//!
//! ```toml
//! data_dir = "data"
//!
//! [players]
//! player1 = "Nemo"
//! player2 = "Dory"
//!
//! [rules]
//! extra_turn_roll = 1
//! descend_finish_wins = false
//! ascend_finish_wins = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId, PlayerPair, RulesConfig};

/// Names given to the players of a fresh game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub player1: String,
    pub player2: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        let names = GameState::new().names();
        Self {
            player1: names[PlayerId::ONE].clone(),
            player2: names[PlayerId::TWO].clone(),
        }
    }
}

impl PlayersConfig {
    /// Names indexed by seat.
    #[must_use]
    pub fn names(&self) -> PlayerPair<String> {
        PlayerPair::new(|id| match id {
            PlayerId::ONE => self.player1.clone(),
            _ => self.player2.clone(),
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `gameState`, `gameStatistics` and `diceState` records.
    pub data_dir: PathBuf,
    pub players: PlayersConfig,
    pub rules: RulesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            players: PlayersConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        config
            .rules
            .validate()
            .map_err(|e| anyhow!("Invalid rules in {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Load `path`, or the defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub fn create_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fishboat.toml");

        Config::create_default(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, Config::default());
        assert_eq!(loaded.players.player1, "Player 1");
        assert_eq!(loaded.rules.extra_turn_roll, 1);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fishboat.toml");
        fs::write(
            &path,
            "[players]\nplayer2 = \"Dory\"\n\n[rules]\nextra_turn_roll = 6\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.players.names()[PlayerId::ONE], "Player 1");
        assert_eq!(config.players.names()[PlayerId::TWO], "Dory");
        assert_eq!(config.rules.extra_turn_roll, 6);
        assert!(config.rules.ascend_finish_wins);
    }

    #[test]
    fn test_bad_rules_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fishboat.toml");
        fs::write(&path, "[rules]\nextra_turn_roll = 9\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid rules"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
