use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{rank, Leaderboard, LeaderboardError, Nickname, ScoreRow};

/// Leaderboard kept in process memory, with switchable failures
#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    rows: Mutex<Vec<ScoreRow>>,
    insert_failure: Option<String>,
    fetch_failure: Option<String>,
    insert_calls: AtomicUsize,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<ScoreRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Make every insert fail with `message`
    pub fn failing_insert(mut self, message: &str) -> Self {
        self.insert_failure = Some(message.to_string());
        self
    }

    /// Make every fetch fail with `message`
    pub fn failing_fetch(mut self, message: &str) -> Self {
        self.fetch_failure = Some(message.to_string());
        self
    }

    /// Number of insert attempts that reached this leaderboard
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn insert_score(&self, nickname: &Nickname, score: u32) -> Result<(), LeaderboardError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.insert_failure {
            return Err(LeaderboardError::RemoteSubmissionFailure(message.clone()));
        }

        let mut rows = self
            .rows
            .lock()
            .map_err(|_| LeaderboardError::RemoteSubmissionFailure("poisoned".to_string()))?;
        rows.push(ScoreRow::new(nickname.as_str(), score));
        Ok(())
    }

    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        if let Some(message) = &self.fetch_failure {
            return Err(LeaderboardError::RemoteFetchFailure(message.clone()));
        }

        let rows = self
            .rows
            .lock()
            .map_err(|_| LeaderboardError::RemoteFetchFailure("poisoned".to_string()))?;
        Ok(rank(rows.clone(), limit))
    }
}
