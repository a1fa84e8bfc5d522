use thiserror::Error;

/// Why a nickname was refused before reaching the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    #[error("please enter a nickname (1-{max} characters)")]
    Empty { max: usize },
    #[error("nickname must be at most {max} characters")]
    TooLong { max: usize },
}

/// Leaderboard failures. None of them are fatal to the game; they are shown
/// inline and the player can carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error(transparent)]
    InvalidNickname(#[from] NicknameError),
    #[error("{0}")]
    RemoteSubmissionFailure(String),
    #[error("{0}")]
    RemoteFetchFailure(String),
}
