use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};
use std::time::Duration;

use super::presenter::{BoardFrame, ViewPresenter};
use super::scheduler::{FrameHandle, FrameScheduler};
use crate::game::{Direction, GameSession, GameStatus, Position, TickOutcome};
use crate::leaderboard::{LeaderboardError, LeaderboardView, Nickname, ScoreSubmission};
use crate::metrics::GameMetrics;

/// A score submission that passed validation and should be sent.
/// `game` ties the eventual result back to the game it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub game: u64,
    pub nickname: Nickname,
    pub score: u32,
}

/// Drives a [`GameSession`] from frame callbacks.
///
/// Every frame runs the ticks that came due since the last applied tick
/// boundary, then renders with the leftover fraction of a tick as the
/// interpolation factor. While paused no ticks run and the board is drawn
/// at rest; resuming re-anchors the tick boundary so paused time is never
/// replayed. Game over and quit cancel the outstanding frame.
pub struct LoopDriver<S, P, R = ThreadRng> {
    session: GameSession<R>,
    metrics: GameMetrics,
    scheduler: S,
    presenter: P,
    previous_snake: Vec<Position>,
    last_tick_time: Duration,
    frame: Option<FrameHandle>,
    submission: ScoreSubmission,
    game_id: u64,
}

impl<S: FrameScheduler, P: ViewPresenter, R: Rng> LoopDriver<S, P, R> {
    pub fn new(session: GameSession<R>, metrics: GameMetrics, scheduler: S, mut presenter: P) -> Self {
        presenter.update_high_score(metrics.high_score);
        presenter.show_start_screen();
        let previous_snake = session.snake().body.clone();

        Self {
            session,
            metrics,
            scheduler,
            presenter,
            previous_snake,
            last_tick_time: Duration::ZERO,
            frame: None,
            submission: ScoreSubmission::default(),
            game_id: 0,
        }
    }

    /// Start a fresh game at `now` and request the first frame
    pub fn start(&mut self, now: Duration) {
        self.cancel_frame();
        self.session.initialize();
        self.game_id += 1;
        self.previous_snake = self.session.snake().body.clone();
        self.last_tick_time = now;
        self.submission.reset();
        self.metrics.on_game_start(now);

        self.presenter.update_score(0);
        self.presenter.update_high_score(self.metrics.high_score);
        self.presenter.show_playing();
        self.render(1.0);
        self.schedule_frame();
    }

    /// The frame callback
    pub fn on_frame(&mut self, now: Duration) {
        self.frame = None;

        let status = self.session.status();
        if status != GameStatus::Running && status != GameStatus::Paused {
            return;
        }

        let ticks = self.catch_up(now);
        if ticks > 1 {
            debug!("caught up {} ticks in one frame", ticks);
        }

        let progress = if self.session.status() == GameStatus::Paused {
            1.0
        } else {
            let interval = self.session.config().tick_interval();
            let elapsed = now.saturating_sub(self.last_tick_time);
            (elapsed.as_secs_f64() / interval.as_secs_f64()).clamp(0.0, 1.0)
        };

        self.metrics.update(now);
        self.render(progress);

        if self.session.status() == GameStatus::Over {
            self.finish_game();
        } else {
            self.schedule_frame();
        }
    }

    /// Queue a turn for the next tick. Ignored unless the game is running.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.session.set_pending_direction(direction)
    }

    pub fn pause(&mut self) -> bool {
        if !self.session.pause() {
            return false;
        }
        info!("game paused");
        self.presenter.show_paused();
        true
    }

    /// Resume a paused game, treating `now` as the latest tick boundary
    pub fn resume(&mut self, now: Duration) -> bool {
        if !self.session.resume() {
            return false;
        }
        info!("game resumed");
        self.last_tick_time = now;
        self.presenter.show_playing();
        self.schedule_frame();
        true
    }

    /// Leave the current game (running, paused or over) for the start screen
    pub fn quit(&mut self) {
        self.cancel_frame();
        self.session.quit();
        self.submission.reset();
        self.presenter.show_start_screen();
        info!("returned to start screen");
    }

    /// Validate `raw_nickname` for the game that just ended.
    ///
    /// Returns the submission to send, or `None` when nothing should be sent:
    /// no finished game, already recorded, a request still pending, or an
    /// invalid nickname (reported through the presenter).
    pub fn begin_submission(&mut self, raw_nickname: &str) -> Option<PendingSubmission> {
        if self.session.status() != GameStatus::Over {
            return None;
        }

        match self.submission.begin(raw_nickname) {
            Ok(Some(nickname)) => {
                self.presenter.show_submitting();
                Some(PendingSubmission {
                    game: self.game_id,
                    nickname,
                    score: self.session.score(),
                })
            }
            Ok(None) => None,
            Err(err) => {
                self.presenter.show_record_error(&err.to_string());
                None
            }
        }
    }

    /// Apply the outcome of a submission.
    ///
    /// On success the game is closed and the start screen shown. Returns true
    /// when the leaderboard should be reloaded.
    pub fn finish_submission(&mut self, game: u64, result: Result<(), LeaderboardError>) -> bool {
        if game != self.game_id || self.session.status() != GameStatus::Over {
            debug!("dropping submission result for a game no longer on screen");
            return result.is_ok();
        }

        self.submission.finish(&result);
        match result {
            Ok(()) => {
                self.presenter.show_record_success();
                self.quit();
                true
            }
            Err(err) => {
                self.presenter
                    .show_record_error(&format!("Failed to record: {}", err));
                false
            }
        }
    }

    pub fn show_leaderboard(&mut self, view: &LeaderboardView) {
        self.presenter.show_leaderboard(view);
    }

    pub fn status(&self) -> GameStatus {
        self.session.status()
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn last_tick_time(&self) -> Duration {
        self.last_tick_time
    }

    pub fn frame_requested(&self) -> bool {
        self.frame.is_some()
    }

    /// Run every tick whose boundary is at or before `now`
    fn catch_up(&mut self, now: Duration) -> u32 {
        let interval = self.session.config().tick_interval();
        let mut ticks = 0;

        while self.session.status() == GameStatus::Running && self.last_tick_time + interval <= now {
            let before = self.session.snake().body.clone();
            let outcome = self.session.tick();
            self.last_tick_time += interval;
            ticks += 1;

            match outcome {
                TickOutcome::Moved => self.previous_snake = before,
                TickOutcome::Ate => {
                    self.previous_snake = before;
                    self.report_score();
                }
                TickOutcome::Ended(_) => {
                    if self.session.snake().len() != before.len() {
                        // Grew onto the last free cell
                        self.previous_snake = before;
                    }
                    self.report_score();
                }
                TickOutcome::Idle => {}
            }
        }

        ticks
    }

    fn report_score(&mut self) {
        let score = self.session.score();
        self.presenter.update_score(score);
        if self.metrics.observe_score(score) {
            self.presenter.update_high_score(self.metrics.high_score);
        }
    }

    /// Draw the board as the session's snapshot shows it
    fn render(&mut self, progress: f64) {
        let snapshot = self.session.snapshot();
        let config = self.session.config();
        let frame = BoardFrame::interpolate(
            &self.previous_snake,
            &snapshot.snake,
            snapshot.fruit,
            snapshot.direction,
            config.grid_size,
            config.cell_size,
            progress,
        );
        self.presenter.render_board(&frame);
    }

    fn finish_game(&mut self) {
        self.cancel_frame();
        let snapshot = self.session.snapshot();
        info!(
            "game {} finished ({:?}) with score {}",
            self.game_id, snapshot.end_reason, snapshot.score
        );
        self.metrics.on_game_over(snapshot.score);
        self.submission.reset();
        self.presenter.update_high_score(self.metrics.high_score);
        self.presenter.show_game_over(snapshot.score);
    }

    fn schedule_frame(&mut self) {
        if self.frame.is_none() {
            self.frame = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
