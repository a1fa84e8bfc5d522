use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::config::AppConfig;
use grid_snake::logging;
use grid_snake::modes::{LeaderboardMode, PlayMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake with a remote leaderboard")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Directory holding default.toml and user.toml
    #[arg(long, default_value = "config")]
    config: PathBuf,

    /// Cells per side of the board
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds per simulation tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Number of leaderboard rows to show
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Print the leaderboard and exit
    Leaderboard,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(grid_size) = self.grid_size {
            config.game.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.game.tick_interval_ms = tick_ms;
        }
        if let Some(limit) = self.limit {
            config.leaderboard.limit = limit;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered configuration, command line last
    let mut config = AppConfig::load_from(&cli.config).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid command line settings")?;

    logging::init(&config.debug)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(&config);
            play_mode.run().await?;
        }
        Mode::Leaderboard => {
            LeaderboardMode::new(&config).run().await?;
        }
    }

    Ok(())
}
