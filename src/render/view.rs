use crate::driver::{BoardFrame, ViewPresenter};
use crate::leaderboard::{LeaderboardView, MAX_NICKNAME_LEN};

/// Which screen is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// State of the score-recording form on the game over screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Idle,
    Submitting,
    Failed(String),
    Recorded,
}

/// Everything the terminal shows, updated through [`ViewPresenter`]
#[derive(Debug, Clone)]
pub struct TerminalView {
    pub screen: Screen,
    pub board: Option<BoardFrame>,
    pub score: u32,
    pub high_score: u32,
    pub final_score: u32,
    pub tick_interval_ms: u64,
    pub nickname: String,
    pub record_status: RecordStatus,
    pub leaderboard: LeaderboardView,
}

impl TerminalView {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            screen: Screen::Start,
            board: None,
            score: 0,
            high_score: 0,
            final_score: 0,
            tick_interval_ms,
            nickname: String::new(),
            record_status: RecordStatus::Idle,
            leaderboard: LeaderboardView::Loading,
        }
    }

    /// Type into the nickname field. Input stops a little past the limit so
    /// an over-long name still gets a validation message.
    pub fn push_nickname_char(&mut self, c: char) {
        if c.is_control() || self.nickname.chars().count() > MAX_NICKNAME_LEN {
            return;
        }
        self.nickname.push(c);
    }

    pub fn pop_nickname_char(&mut self) {
        self.nickname.pop();
    }
}

impl ViewPresenter for TerminalView {
    fn show_start_screen(&mut self) {
        self.screen = Screen::Start;
    }

    fn show_playing(&mut self) {
        self.screen = Screen::Playing;
        self.record_status = RecordStatus::Idle;
    }

    fn show_paused(&mut self) {
        self.screen = Screen::Paused;
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.screen = Screen::GameOver;
        self.final_score = final_score;
        self.nickname.clear();
        self.record_status = RecordStatus::Idle;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn update_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    fn render_board(&mut self, frame: &BoardFrame) {
        self.board = Some(frame.clone());
    }

    fn show_leaderboard(&mut self, view: &LeaderboardView) {
        self.leaderboard = view.clone();
    }

    fn show_submitting(&mut self) {
        self.record_status = RecordStatus::Submitting;
    }

    fn show_record_error(&mut self, message: &str) {
        self.record_status = RecordStatus::Failed(message.to_string());
    }

    fn show_record_success(&mut self) {
        self.record_status = RecordStatus::Recorded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_clears_form() {
        let mut view = TerminalView::new(350);
        view.nickname = "old".to_string();
        view.record_status = RecordStatus::Failed("nope".to_string());

        view.show_game_over(40);

        assert_eq!(view.screen, Screen::GameOver);
        assert_eq!(view.final_score, 40);
        assert!(view.nickname.is_empty());
        assert_eq!(view.record_status, RecordStatus::Idle);
    }

    #[test]
    fn test_nickname_editing() {
        let mut view = TerminalView::new(350);
        for c in "ada\n".chars() {
            view.push_nickname_char(c);
        }
        assert_eq!(view.nickname, "ada");

        view.pop_nickname_char();
        assert_eq!(view.nickname, "ad");

        for _ in 0..40 {
            view.push_nickname_char('x');
        }
        assert_eq!(view.nickname.chars().count(), MAX_NICKNAME_LEN + 1);
    }

    #[test]
    fn test_success_survives_until_next_game() {
        let mut view = TerminalView::new(350);
        view.show_record_success();
        view.show_start_screen();
        assert_eq!(view.record_status, RecordStatus::Recorded);

        view.show_playing();
        assert_eq!(view.record_status, RecordStatus::Idle);
    }
}
