//! Grid Snake - a grid snake game for the terminal
//!
//! This library provides:
//! - Core game rules, one tick at a time (game module)
//! - A frame-driven loop with catch-up ticks and interpolation (driver module)
//! - TUI rendering and key mapping (render, input modules)
//! - High score persistence (metrics, storage modules)
//! - A remote leaderboard client (leaderboard module)
//! - Play and leaderboard execution modes (modes module)

pub mod config;
pub mod driver;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
