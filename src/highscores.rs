//! Score book: last score, best score and a top-10 leaderboard
//!
//! The simulation only hands over a final integer score; this module owns the
//! storage format (a JSON file).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Error)]
pub enum ScoreBookError {
    #[error("score book I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score book is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Length of the run in simulation ticks
    pub ticks: u64,
    /// Unix timestamp (s) when achieved
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBook {
    /// Score of the most recent run
    pub last_score: u64,
    /// Best score ever recorded
    pub high_score: u64,
    /// Sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a finished run earns a place on the board. Scoreless runs never
    /// do; once the board is full a run has to beat the last place.
    pub fn qualifies(&self, score: u64) -> bool {
        match self.entries.get(MAX_HIGH_SCORES - 1) {
            _ if score == 0 => false,
            Some(last_place) => score > last_place.score,
            None => true,
        }
    }

    /// Record a finished run. Returns the leaderboard rank (1-indexed) if it
    /// made the board.
    pub fn record(&mut self, score: u64, ticks: u64, timestamp: u64) -> Option<usize> {
        self.last_score = score;
        self.high_score = self.high_score.max(score);

        if !self.qualifies(score) {
            return None;
        }
        let entry = HighScoreEntry {
            score,
            ticks,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    /// Load from a JSON file; a missing file is an empty book
    pub fn load(path: &Path) -> Result<Self, ScoreBookError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let book: Self = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", book.entries.len());
                Ok(book)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ScoreBookError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_last_and_best() {
        let mut book = ScoreBook::new();
        assert_eq!(book.record(12, 600, 1), Some(1));
        assert_eq!(book.record(5, 300, 2), Some(2));
        assert_eq!(book.last_score, 5);
        assert_eq!(book.high_score, 12);
    }

    #[test]
    fn test_zero_never_ranks() {
        let mut book = ScoreBook::new();
        assert_eq!(book.record(0, 10, 1), None);
        assert_eq!(book.last_score, 0);
        assert!(book.entries.is_empty());
    }

    #[test]
    fn test_board_is_capped_and_sorted() {
        let mut book = ScoreBook::new();
        for score in 1..=15 {
            book.record(score, score * 10, score);
        }
        assert_eq!(book.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(book.entries[0].score, 15);
        assert_eq!(book.entries[9].score, 6);
        assert!(!book.qualifies(6));
        assert!(book.qualifies(7));
        assert_eq!(book.record(3, 30, 99), None);
        assert_eq!(book.last_score, 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("lane-dash-scores-{}", std::process::id()));
        let path = dir.join("nested").join("scores.json");

        assert_eq!(ScoreBook::load(&path).unwrap(), ScoreBook::new());

        let mut book = ScoreBook::new();
        book.record(42, 1200, 1_700_000_000);
        book.save(&path).unwrap();
        assert_eq!(ScoreBook::load(&path).unwrap(), book);

        fs::write(&path, "{ broken").unwrap();
        assert!(matches!(ScoreBook::load(&path), Err(ScoreBookError::Json(_))));

        let _ = fs::remove_dir_all(dir);
    }
}
