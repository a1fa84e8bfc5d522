use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::interval;

use crate::config::AppConfig;
use crate::driver::{Clock, FrameSlot, LoopDriver, MonotonicClock};
use crate::game::GameSession;
use crate::input::{InputHandler, KeyAction};
use crate::leaderboard::{self, Leaderboard, LeaderboardError, LeaderboardView};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, TerminalView};
use crate::storage::FileHighScoreStore;

/// Results of leaderboard calls made off the frame loop
#[derive(Debug)]
pub enum LeaderboardEvent {
    Loaded(LeaderboardView),
    Submitted {
        game: u64,
        result: Result<(), LeaderboardError>,
    },
}

/// Interactive play in the terminal
pub struct PlayMode<C = MonotonicClock> {
    driver: LoopDriver<FrameSlot, TerminalView>,
    clock: C,
    leaderboard: Arc<dyn Leaderboard>,
    limit: usize,
    renderer: Renderer,
    input_handler: InputHandler,
    events_tx: UnboundedSender<LeaderboardEvent>,
    events_rx: UnboundedReceiver<LeaderboardEvent>,
    should_quit: bool,
}

impl PlayMode<MonotonicClock> {
    pub fn new(config: &AppConfig) -> Self {
        let store = FileHighScoreStore::new(&config.storage.high_score_path);
        let metrics = GameMetrics::new(Box::new(store));
        let session = GameSession::new(config.game.clone());
        let view = TerminalView::new(config.game.tick_interval_ms);
        let driver = LoopDriver::new(session, metrics, FrameSlot::new(), view);

        Self::from_parts(
            driver,
            MonotonicClock::new(),
            leaderboard::from_config(&config.leaderboard),
            config.leaderboard.limit,
        )
    }
}

impl<C: Clock> PlayMode<C> {
    pub fn from_parts(
        driver: LoopDriver<FrameSlot, TerminalView>,
        clock: C,
        leaderboard: Arc<dyn Leaderboard>,
        limit: usize,
    ) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let renderer = Renderer::new(driver.session().config().grid_size);

        Self {
            driver,
            clock,
            leaderboard,
            limit,
            renderer,
            input_handler: InputHandler::new(),
            events_tx,
            events_rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        self.refresh_leaderboard();

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The frame host fires at ~60 Hz; ticks are paced by the driver
        let render_interval = Duration::from_millis(16);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Frame callback and draw
                _ = render_timer.tick() => {
                    self.run_due_frame();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.driver.presenter(), self.driver.metrics());
                    }).context("Failed to draw frame")?;
                }

                // Leaderboard results
                Some(event) = self.events_rx.recv() => {
                    self.handle_leaderboard_event(event);
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Fire the frame callback if the driver asked for one
    fn run_due_frame(&mut self) {
        if self.driver.scheduler_mut().take_due().is_some() {
            self.driver.on_frame(self.clock.now());
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let screen = self.driver.presenter().screen;
        let action = self.input_handler.handle_key_event(key, screen);
        debug!("{:?} on {:?} -> {:?}", key.code, screen, action);

        match action {
            KeyAction::Turn(direction) => {
                self.driver.set_direction(direction);
            }
            KeyAction::Start | KeyAction::Restart => {
                self.driver.start(self.clock.now());
            }
            KeyAction::Pause => {
                self.driver.pause();
            }
            KeyAction::Resume => {
                self.driver.resume(self.clock.now());
            }
            KeyAction::QuitGame => self.driver.quit(),
            KeyAction::Submit => self.submit(),
            KeyAction::NicknameChar(c) => self.driver.presenter_mut().push_nickname_char(c),
            KeyAction::NicknameBackspace => self.driver.presenter_mut().pop_nickname_char(),
            KeyAction::Exit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn submit(&mut self) {
        let nickname = self.driver.presenter().nickname.clone();
        let Some(pending) = self.driver.begin_submission(&nickname) else {
            return;
        };

        info!("submitting score {} for {}", pending.score, pending.nickname);
        let board = Arc::clone(&self.leaderboard);
        let events = self.events_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = leaderboard::submit_score(&*board, pending.nickname.as_str(), pending.score)
                .map(|_| ());
            // The receiver only goes away on shutdown
            let _ = events.send(LeaderboardEvent::Submitted {
                game: pending.game,
                result,
            });
        });
    }

    fn refresh_leaderboard(&mut self) {
        self.driver.show_leaderboard(&LeaderboardView::Loading);

        let board = Arc::clone(&self.leaderboard);
        let events = self.events_tx.clone();
        let limit = self.limit;
        tokio::task::spawn_blocking(move || {
            let view = leaderboard::load_leaderboard(&*board, limit);
            let _ = events.send(LeaderboardEvent::Loaded(view));
        });
    }

    fn handle_leaderboard_event(&mut self, event: LeaderboardEvent) {
        match event {
            LeaderboardEvent::Loaded(view) => self.driver.show_leaderboard(&view),
            LeaderboardEvent::Submitted { game, result } => {
                if self.driver.finish_submission(game, result) {
                    self.refresh_leaderboard();
                }
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
