use super::{LeaderboardError, Nickname, NicknameError};

/// Per-game guard around recording a score: one successful record per
/// game, one request in flight at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSubmission {
    recorded: bool,
    in_flight: bool,
}

impl ScoreSubmission {
    /// Forget the previous game's submission
    pub fn reset(&mut self) {
        self.recorded = false;
        self.in_flight = false;
    }

    /// Validate the nickname and mark a request as in flight.
    ///
    /// `Ok(None)` means nothing should be sent: the score is already recorded
    /// or a request is still pending.
    pub fn begin(&mut self, raw_nickname: &str) -> Result<Option<Nickname>, NicknameError> {
        if self.recorded || self.in_flight {
            return Ok(None);
        }
        let nickname = Nickname::parse(raw_nickname)?;
        self.in_flight = true;
        Ok(Some(nickname))
    }

    /// Settle the in-flight request
    pub fn finish(&mut self, result: &Result<(), LeaderboardError>) {
        self.in_flight = false;
        if result.is_ok() {
            self.recorded = true;
        }
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
