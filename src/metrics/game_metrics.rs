use log::{info, warn};
use std::time::Duration;

use crate::storage::HighScoreStore;

/// Process-wide score bookkeeping: the persisted high score, games played
/// and elapsed time of the current game.
pub struct GameMetrics {
    pub high_score: u32,
    pub games_played: u32,
    pub elapsed_time: Duration,
    started_at: Duration,
    store: Box<dyn HighScoreStore>,
}

impl GameMetrics {
    /// Load the high score from `store`
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load();
        info!("loaded high score {}", high_score);
        Self {
            high_score,
            games_played: 0,
            elapsed_time: Duration::ZERO,
            started_at: Duration::ZERO,
            store,
        }
    }

    /// Raise the high score if `score` beats it, persisting right away.
    /// Returns true when the high score changed.
    pub fn observe_score(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }

        self.high_score = score;
        info!("new high score {}", score);
        if let Err(err) = self.store.save(score) {
            warn!("failed to persist high score: {:#}", err);
        }
        true
    }

    pub fn update(&mut self, now: Duration) {
        self.elapsed_time = now.saturating_sub(self.started_at);
    }

    pub fn on_game_start(&mut self, now: Duration) {
        self.started_at = now;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.observe_score(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileHighScoreStore, MemoryHighScoreStore};
    use tempfile::TempDir;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new(Box::new(MemoryHighScoreStore::default()));
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new(Box::new(MemoryHighScoreStore::new(20)));
        assert_eq!(metrics.high_score, 20);

        assert!(!metrics.observe_score(10));
        assert!(!metrics.observe_score(20));
        assert_eq!(metrics.high_score, 20);

        assert!(metrics.observe_score(30));
        assert_eq!(metrics.high_score, 30);

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 30); // Should not decrease
        assert_eq!(metrics.games_played, 1);
    }

    #[test]
    fn test_high_score_is_persisted_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.json");

        let mut metrics = GameMetrics::new(Box::new(FileHighScoreStore::new(&path)));
        assert_eq!(metrics.high_score, 0);
        metrics.observe_score(40);

        assert_eq!(FileHighScoreStore::new(&path).load(), 40);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new(Box::new(MemoryHighScoreStore::default()));
        metrics.update(Duration::from_secs(5));
        assert_eq!(metrics.elapsed_time, Duration::from_secs(5));

        metrics.on_game_start(Duration::from_secs(5));
        metrics.update(Duration::from_millis(5_500));
        assert_eq!(metrics.elapsed_time, Duration::from_millis(500));
    }
}
