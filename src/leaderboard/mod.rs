//! Remote leaderboard
//!
//! The leaderboard itself lives in an external table; this module holds the
//! [`Leaderboard`] seam, its implementations, nickname validation and the
//! view of the top scores the UI shows.
//!
//! Every remote call is made once, with no retry. Failures come back as
//! [`LeaderboardError`] values for the caller to display.

pub mod error;
pub mod memory;
pub mod offline;
pub mod rest;
pub mod submission;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::LeaderboardConfig;

pub use error::{LeaderboardError, NicknameError};
pub use memory::InMemoryLeaderboard;
pub use offline::OfflineLeaderboard;
pub use rest::RestLeaderboard;
pub use submission::ScoreSubmission;

/// Longest nickname accepted, in characters
pub const MAX_NICKNAME_LEN: usize = 20;

/// A trimmed nickname of 1 to [`MAX_NICKNAME_LEN`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(raw: &str) -> Result<Self, NicknameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NicknameError::Empty {
                max: MAX_NICKNAME_LEN,
            });
        }
        if trimmed.chars().count() > MAX_NICKNAME_LEN {
            return Err(NicknameError::TooLong {
                max: MAX_NICKNAME_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub nickname: String,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ScoreRow {
    pub fn new(nickname: impl Into<String>, score: u32) -> Self {
        Self {
            nickname: nickname.into(),
            score,
            created_at: None,
        }
    }
}

/// The remote score table
pub trait Leaderboard: Send + Sync {
    /// Store one score
    fn insert_score(&self, nickname: &Nickname, score: u32) -> Result<(), LeaderboardError>;

    /// Top scores, highest first, at most `limit` rows
    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError>;
}

/// The REST leaderboard when an endpoint is configured, the offline one otherwise
pub fn from_config(config: &LeaderboardConfig) -> Arc<dyn Leaderboard> {
    match config.endpoint() {
        Some((url, key)) => {
            info!("using leaderboard at {}", url);
            Arc::new(RestLeaderboard::new(url, key, &config.table, config.timeout()))
        }
        None => {
            info!("no leaderboard endpoint configured, running offline");
            Arc::new(OfflineLeaderboard)
        }
    }
}

/// Validate `raw_nickname` and, only if it is acceptable, insert the score
pub fn submit_score(
    board: &dyn Leaderboard,
    raw_nickname: &str,
    score: u32,
) -> Result<Nickname, LeaderboardError> {
    let nickname = Nickname::parse(raw_nickname)?;
    board.insert_score(&nickname, score).inspect_err(|err| {
        warn!("score submission for {} failed: {}", nickname, err);
    })?;
    info!("recorded score {} for {}", score, nickname);
    Ok(nickname)
}

/// Fetch the top scores and turn the outcome into something displayable
pub fn load_leaderboard(board: &dyn Leaderboard, limit: usize) -> LeaderboardView {
    let result = board.fetch_leaderboard(limit);
    if let Err(err) = &result {
        warn!("leaderboard fetch failed: {}", err);
    }
    LeaderboardView::from_fetch(result)
}

/// What the leaderboard list currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeaderboardView {
    #[default]
    Loading,
    Unavailable,
    Empty,
    Rows(Vec<ScoreRow>),
}

impl LeaderboardView {
    pub fn from_fetch(result: Result<Vec<ScoreRow>, LeaderboardError>) -> Self {
        match result {
            Err(_) => LeaderboardView::Unavailable,
            Ok(rows) if rows.is_empty() => LeaderboardView::Empty,
            Ok(rows) => LeaderboardView::Rows(rows),
        }
    }

    /// The list entries as text, placeholders included
    pub fn entries(&self) -> Vec<String> {
        match self {
            LeaderboardView::Loading => vec!["Loading...".to_string()],
            LeaderboardView::Unavailable => vec!["Leaderboard unavailable".to_string()],
            LeaderboardView::Empty => vec!["No scores yet".to_string()],
            LeaderboardView::Rows(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| format!("{:>2}. {:<20} {:>6}", i + 1, row.nickname, row.score))
                .collect(),
        }
    }
}

/// Sort highest first and cut to `limit`
pub(crate) fn rank(mut rows: Vec<ScoreRow>, limit: usize) -> Vec<ScoreRow> {
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_is_trimmed() {
        let nickname = Nickname::parse("  viper  ").unwrap();
        assert_eq!(nickname.as_str(), "viper");
    }

    #[test]
    fn test_nickname_limits() {
        assert_eq!(
            Nickname::parse(""),
            Err(NicknameError::Empty { max: 20 })
        );
        assert_eq!(
            Nickname::parse("   "),
            Err(NicknameError::Empty { max: 20 })
        );
        assert!(Nickname::parse(&"a".repeat(20)).is_ok());
        assert_eq!(
            Nickname::parse(&"a".repeat(21)),
            Err(NicknameError::TooLong { max: 20 })
        );
        // Counted in characters, not bytes
        assert!(Nickname::parse(&"뱀".repeat(20)).is_ok());
    }

    #[test]
    fn test_empty_nickname_never_reaches_remote() {
        let board = InMemoryLeaderboard::new();
        let result = submit_score(&board, "", 50);

        assert_eq!(
            result,
            Err(LeaderboardError::InvalidNickname(NicknameError::Empty {
                max: 20
            }))
        );
        assert_eq!(board.insert_calls(), 0);
    }

    #[test]
    fn test_submit_then_load() {
        let board = InMemoryLeaderboard::new();
        submit_score(&board, "ada", 30).unwrap();
        submit_score(&board, "bob", 50).unwrap();

        let view = load_leaderboard(&board, 10);
        assert_eq!(
            view,
            LeaderboardView::Rows(vec![ScoreRow::new("bob", 50), ScoreRow::new("ada", 30)])
        );
    }

    #[test]
    fn test_fetch_error_shows_single_placeholder() {
        let board = InMemoryLeaderboard::new().failing_fetch("connection refused");
        let view = load_leaderboard(&board, 10);

        assert_eq!(view, LeaderboardView::Unavailable);
        assert_eq!(view.entries(), vec!["Leaderboard unavailable".to_string()]);
    }

    #[test]
    fn test_entries_are_ranked() {
        let view = LeaderboardView::from_fetch(Ok(vec![
            ScoreRow::new("bob", 50),
            ScoreRow::new("ada", 30),
        ]));
        let entries = view.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with(" 1. bob"));
        assert!(entries[1].trim_end().ends_with("30"));

        assert_eq!(
            LeaderboardView::from_fetch(Ok(vec![])).entries(),
            vec!["No scores yet".to_string()]
        );
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let rows = vec![
            ScoreRow::new("a", 10),
            ScoreRow::new("b", 40),
            ScoreRow::new("c", 20),
        ];
        let ranked = rank(rows, 2);
        assert_eq!(ranked, vec![ScoreRow::new("b", 40), ScoreRow::new("c", 20)]);
    }
}
