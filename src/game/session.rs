use super::{
    config::GameConfig,
    direction::Direction,
    state::{EndReason, GameSnapshot, GameStatus, Position, Snake},
};
use log::{debug, info};
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

/// What a single tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running, nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the fruit and grew
    Ate,
    /// The game ended on this tick
    Ended(EndReason),
}

/// One game of snake: the only owner of snake, fruit, score and status.
///
/// All mutation goes through [`GameSession::initialize`],
/// [`GameSession::set_pending_direction`] and [`GameSession::tick`] (plus the
/// pause/resume/quit transitions). Renderers read a [`GameSnapshot`].
pub struct GameSession<R = ThreadRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    fruit: Option<Position>,
    score: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
    pending_direction: Option<Direction>,
}

impl GameSession<ThreadRng> {
    /// Create a session that has not started yet
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let snake = Self::spawn_snake(&config);
        Self {
            config,
            rng,
            snake,
            fruit: None,
            score: 0,
            status: GameStatus::NotStarted,
            end_reason: None,
            pending_direction: None,
        }
    }

    /// Start a running game from an explicit board position
    pub fn with_state(config: GameConfig, rng: R, snake: Snake, fruit: Option<Position>) -> Self {
        Self {
            config,
            rng,
            snake,
            fruit,
            score: 0,
            status: GameStatus::Running,
            end_reason: None,
            pending_direction: None,
        }
    }

    /// Reset to a fresh running game
    pub fn initialize(&mut self) {
        self.snake = Self::spawn_snake(&self.config);
        self.fruit = self.spawn_fruit();
        self.score = 0;
        self.end_reason = None;
        self.pending_direction = None;
        self.status = GameStatus::Running;

        info!(
            "game started on a {0}x{0} grid, fruit at {1:?}",
            self.config.grid_size, self.fruit
        );
    }

    /// Record the direction to take on the next tick.
    ///
    /// Ignored unless the game is running; the latest call before a tick wins.
    /// Returns whether the direction was recorded.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance the game by exactly one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        // A pending reversal is dropped rather than applied
        if let Some(pending) = self.pending_direction.take() {
            if !self.snake.direction.is_opposite(pending) {
                self.snake.direction = pending;
            }
        }

        let new_head = self.snake.head().moved_in_direction(self.snake.direction);

        if !new_head.is_within(self.config.grid_size) {
            return self.end(EndReason::Wall);
        }

        // Checked before the tail moves, so its current cell is still fatal
        if self.snake.collides_with_body(new_head) {
            return self.end(EndReason::SelfCollision);
        }

        let ate_fruit = self.fruit == Some(new_head);
        self.snake.advance_to(new_head, ate_fruit);

        if !ate_fruit {
            return TickOutcome::Moved;
        }

        self.score += self.config.fruit_reward;
        self.fruit = self.spawn_fruit();
        debug!("fruit eaten, score {} next fruit {:?}", self.score, self.fruit);

        if self.fruit.is_none() {
            return self.end(EndReason::GridFull);
        }

        TickOutcome::Ate
    }

    /// Suspend ticking. Only a running game can be paused; repeated calls are no-ops.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    /// Abandon the current game and return to the not-started state
    pub fn quit(&mut self) {
        self.status = GameStatus::NotStarted;
        self.pending_direction = None;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.body.clone(),
            fruit: self.fruit,
            score: self.score,
            direction: self.snake.direction,
            status: self.status,
            end_reason: self.end_reason,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Option<Position> {
        self.fruit
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);
        info!("game over ({:?}) with score {}", reason, self.score);
        TickOutcome::Ended(reason)
    }

    fn spawn_snake(config: &GameConfig) -> Snake {
        let center = (config.grid_size / 2) as i32;
        Snake::new(
            Position::new(center, center),
            Direction::Right,
            config.initial_snake_length,
        )
    }

    /// Pick a fruit cell uniformly among the cells the snake does not cover.
    /// `None` means the board is full.
    fn spawn_fruit(&mut self) -> Option<Position> {
        let size = self.config.grid_size as i32;
        let empty_cells: Vec<Position> = (0..size)
            .flat_map(|x| (0..size).map(move |y| Position::new(x, y)))
            .filter(|pos| !self.snake.occupies(*pos))
            .collect();

        empty_cells.choose(&mut self.rng).copied()
    }
}
