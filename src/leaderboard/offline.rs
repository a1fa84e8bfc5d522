use log::warn;

use super::{Leaderboard, LeaderboardError, Nickname, ScoreRow};

/// Stand-in used when no leaderboard endpoint is configured.
///
/// Listing shows an empty table; recording a score fails with a message
/// explaining why.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineLeaderboard;

impl Leaderboard for OfflineLeaderboard {
    fn insert_score(&self, _nickname: &Nickname, _score: u32) -> Result<(), LeaderboardError> {
        warn!("leaderboard not configured, set leaderboard.url and leaderboard.anon_key");
        Err(LeaderboardError::RemoteSubmissionFailure(
            "leaderboard not configured".to_string(),
        ))
    }

    fn fetch_leaderboard(&self, _limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_behaviour() {
        let board = OfflineLeaderboard;
        let nickname = Nickname::parse("ada").unwrap();

        assert!(matches!(
            board.insert_score(&nickname, 10),
            Err(LeaderboardError::RemoteSubmissionFailure(_))
        ));
        assert_eq!(board.fetch_leaderboard(10), Ok(vec![]));
    }
}
