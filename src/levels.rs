//! Level progression and game unlocks
//!
//! A single persisted integer, the current level, gates which games the menu
//! offers. Unlocks are monotonic: reaching a level never re-locks a game.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest valid level
pub const MIN_LEVEL: u32 = 1;
/// Highest valid level
pub const MAX_LEVEL: u32 = 10;

/// Games offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    Flappy,
    Centipede,
    Asteroid,
}

impl Game {
    pub const ALL: [Game; 3] = [Game::Flappy, Game::Centipede, Game::Asteroid];

    /// Level at which the game becomes playable
    pub fn unlock_level(&self) -> u32 {
        match self {
            Game::Flappy => 1,
            Game::Centipede => 3,
            Game::Asteroid => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Flappy => "Flappy",
            Game::Centipede => "Centipede",
            Game::Asteroid => "Asteroid",
        }
    }
}

/// True if `level` is inside [MIN_LEVEL, MAX_LEVEL]
pub fn is_valid_level(level: u32) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to access level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {0} is outside 1..=10")]
    OutOfRange(u32),
}

/// Persisted progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    current_level: u32,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self {
            current_level: MIN_LEVEL,
        }
    }
}

impl LevelProgress {
    /// Start at the given level
    pub fn new(level: u32) -> Result<Self, LevelError> {
        if !is_valid_level(level) {
            return Err(LevelError::OutOfRange(level));
        }
        Ok(Self {
            current_level: level,
        })
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Whether the player may start `game`
    pub fn unlocked(&self, game: Game) -> bool {
        self.meets_requirement(game.unlock_level())
    }

    pub fn meets_requirement(&self, required_level: u32) -> bool {
        self.current_level >= required_level
    }

    /// Games currently playable, in menu order
    pub fn unlocked_games(&self) -> Vec<Game> {
        Game::ALL.into_iter().filter(|g| self.unlocked(*g)).collect()
    }

    /// Move up one level, saturating at MAX_LEVEL. Returns the new level.
    pub fn advance(&mut self) -> u32 {
        if self.current_level < MAX_LEVEL {
            self.current_level += 1;
            log::info!("Reached level {}", self.current_level);
        }
        self.current_level
    }

    /// Read progress from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let progress: LevelProgress = serde_json::from_str(&json)?;
        if !is_valid_level(progress.current_level) {
            return Err(LevelError::OutOfRange(progress.current_level));
        }
        log::info!("Loaded level {}", progress.current_level);
        Ok(progress)
    }

    /// Read progress, starting over at level 1 when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(progress) => progress,
            Err(e) => {
                log::info!("No usable level file, starting at level {} ({})", MIN_LEVEL, e);
                Self::default()
            }
        }
    }

    /// Write progress as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)?;
        fs::write(path, json).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Level {} saved", self.current_level);
        Ok(())
    }
}
