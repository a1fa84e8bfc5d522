//! Leaderboard backed by a PostgREST table (as exposed by Supabase)

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{rank, Leaderboard, LeaderboardError, Nickname, ScoreRow};

#[derive(Debug, Serialize)]
struct NewScore<'a> {
    nickname: &'a str,
    score: u32,
}

/// Error body PostgREST sends back with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

pub struct RestLeaderboard {
    agent: ureq::Agent,
    table_url: String,
    api_key: String,
}

impl RestLeaderboard {
    pub fn new(base_url: &str, api_key: &str, table: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        }
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }
}

impl Leaderboard for RestLeaderboard {
    fn insert_score(&self, nickname: &Nickname, score: u32) -> Result<(), LeaderboardError> {
        debug!("POST {} ({}, {})", self.table_url, nickname, score);
        let request = self
            .authorized(self.agent.post(&self.table_url))
            .set("Prefer", "return=minimal");

        request
            .send_json(NewScore {
                nickname: nickname.as_str(),
                score,
            })
            .map(|_| ())
            .map_err(|err| LeaderboardError::RemoteSubmissionFailure(describe(err)))
    }

    fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        debug!("GET {} (limit {})", self.table_url, limit);
        let response = self
            .authorized(self.agent.get(&self.table_url))
            .query("select", "nickname,score,created_at")
            .query("order", "score.desc")
            .query("limit", &limit.to_string())
            .call()
            .map_err(|err| LeaderboardError::RemoteFetchFailure(describe(err)))?;

        let rows: Vec<ScoreRow> = response
            .into_json()
            .map_err(|err| LeaderboardError::RemoteFetchFailure(err.to_string()))?;

        Ok(rank(rows, limit))
    }
}

/// Human-readable message for a failed request
fn describe(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => response
            .into_json::<ApiError>()
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("server returned status {}", code)),
        ureq::Error::Transport(transport) => transport.to_string(),
    }
}
