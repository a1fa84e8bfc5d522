//! Persisted high score
//!
//! The high score is a single named value stored as JSON:
//!
//! ```json
//! { "snake_high_score": 120 }
//! ```
//!
//! A missing or unreadable file counts as a high score of 0.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Somewhere a high score can be read from and written back to
pub trait HighScoreStore: Send {
    /// Read the stored value, falling back to 0
    fn load(&self) -> u32;

    /// Overwrite the stored value
    fn save(&mut self, high_score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreRecord {
    snake_high_score: u32,
}

/// High score kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return 0,
        };

        match serde_json::from_str::<HighScoreRecord>(&contents) {
            Ok(record) => record.snake_high_score,
            Err(err) => {
                warn!("ignoring unreadable high score file {:?}: {}", self.path, err);
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let record = HighScoreRecord {
            snake_high_score: high_score,
        };
        let json = serde_json::to_string(&record).context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// High score held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: u32,
    pub saves: u32,
}

impl MemoryHighScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.value = high_score;
        self.saves += 1;
        Ok(())
    }
}
