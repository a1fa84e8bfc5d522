//! Simulation core for grid snake
//!
//! Pure game rules with no I/O or rendering dependencies: a [`GameSession`]
//! advanced one tick at a time, read through [`GameSnapshot`]s.

pub mod config;
pub mod direction;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, MAX_GRID_SIZE, MIN_SNAKE_LENGTH};
pub use direction::Direction;
pub use session::{GameSession, TickOutcome};
pub use state::{EndReason, GameSnapshot, GameStatus, Position, Snake};
