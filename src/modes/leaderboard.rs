use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::leaderboard::{self, Leaderboard, LeaderboardView};

/// Print the top scores and exit
pub struct LeaderboardMode {
    leaderboard: Arc<dyn Leaderboard>,
    limit: usize,
}

impl LeaderboardMode {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_leaderboard(
            leaderboard::from_config(&config.leaderboard),
            config.leaderboard.limit,
        )
    }

    pub fn with_leaderboard(leaderboard: Arc<dyn Leaderboard>, limit: usize) -> Self {
        Self { leaderboard, limit }
    }

    pub async fn run(&self) -> Result<()> {
        let board = Arc::clone(&self.leaderboard);
        let limit = self.limit;
        let view = tokio::task::spawn_blocking(move || leaderboard::load_leaderboard(&*board, limit))
            .await
            .context("Leaderboard request panicked")?;

        let mut stdout = std::io::stdout().lock();
        self.write_to(&view, &mut stdout)
    }

    fn write_to(&self, view: &LeaderboardView, out: &mut impl Write) -> Result<()> {
        info!("showing leaderboard ({} entries max)", self.limit);
        writeln!(out, "Top {} scores", self.limit).context("Failed to write leaderboard")?;
        for entry in view.entries() {
            writeln!(out, "{}", entry).context("Failed to write leaderboard")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{InMemoryLeaderboard, ScoreRow};

    fn output(mode: &LeaderboardMode) -> String {
        let view = leaderboard::load_leaderboard(&*mode.leaderboard, mode.limit);
        let mut out = Vec::new();
        mode.write_to(&view, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lists_ranked_rows() {
        let board = InMemoryLeaderboard::with_rows(vec![
            ScoreRow::new("ada", 30),
            ScoreRow::new("bob", 50),
            ScoreRow::new("cy", 10),
        ]);
        let mode = LeaderboardMode::with_leaderboard(Arc::new(board), 2);
        let text = output(&mode);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Top 2 scores");
        assert!(lines[1].starts_with(" 1. bob"));
        assert!(lines[2].starts_with(" 2. ada"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_failed_fetch_prints_placeholder() {
        let board = InMemoryLeaderboard::new().failing_fetch("timeout");
        let mode = LeaderboardMode::with_leaderboard(Arc::new(board), 10);
        assert!(output(&mode).contains("Leaderboard unavailable"));
    }

    #[tokio::test]
    async fn test_run_against_empty_board() {
        let mode = LeaderboardMode::with_leaderboard(Arc::new(InMemoryLeaderboard::new()), 10);
        mode.run().await.unwrap();
    }
}
