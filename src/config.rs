//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `config/default.toml`
//! 3. `config/user.toml` (user overrides)
//! 4. Environment variables (`SNAKE_SECTION__KEY`)
//! 5. `VITE_SUPABASE_URL` / `VITE_SUPABASE_ANON_KEY` for the leaderboard endpoint

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::game::{GameConfig, MAX_GRID_SIZE, MIN_SNAKE_LENGTH};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board and pace
    #[serde(default)]
    pub game: GameConfig,
    /// Remote leaderboard endpoint
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    /// Local files
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the default `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SNAKE_GAME__TICK_INTERVAL_MS=200 -> game.tick_interval_ms = 200
        figment = figment.merge(Env::prefixed("SNAKE_").split("__"));

        // Variable names used by the web build of the game
        figment = figment
            .merge(
                Env::raw()
                    .only(&["VITE_SUPABASE_URL"])
                    .map(|_| "leaderboard.url".into()),
            )
            .merge(
                Env::raw()
                    .only(&["VITE_SUPABASE_ANON_KEY"])
                    .map(|_| "leaderboard.anon_key".into()),
            );

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        if game.initial_snake_length < MIN_SNAKE_LENGTH {
            return Err(ConfigError::new(format!(
                "game.initial_snake_length must be at least {}",
                MIN_SNAKE_LENGTH
            )));
        }
        // The terminal board needs 4 columns per cell
        if game.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::new(format!(
                "game.grid_size {} exceeds the maximum of {}",
                game.grid_size, MAX_GRID_SIZE
            )));
        }
        // The starting snake trails left from the centre cell
        if game.grid_size < 2 || game.grid_size / 2 + 1 < game.initial_snake_length {
            return Err(ConfigError::new(format!(
                "game.grid_size {} is too small for a snake of length {}",
                game.grid_size, game.initial_snake_length
            )));
        }
        if game.cell_size == 0 {
            return Err(ConfigError::new("game.cell_size must be positive"));
        }
        if self.leaderboard.limit == 0 {
            return Err(ConfigError::new("leaderboard.limit must be positive"));
        }
        if self.leaderboard.timeout_secs == 0 {
            return Err(ConfigError::new("leaderboard.timeout_secs must be positive"));
        }
        Ok(())
    }
}

/// Leaderboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Base URL of the PostgREST/Supabase project
    pub url: Option<String>,
    /// Anonymous API key sent with every request
    pub anon_key: Option<String>,
    /// Table holding the scores
    pub table: String,
    /// Number of rows to show
    pub limit: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: "scores".to_string(),
            limit: 10,
            timeout_secs: 5,
        }
    }
}

impl LeaderboardConfig {
    /// URL and key, when both are set and non-empty
    pub fn endpoint(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.trim().is_empty())?;
        let key = self.anon_key.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((url, key))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the high score
    pub high_score_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("snake_high_score.json"),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// File receiving log output; the terminal belongs to the game
    pub log_file: PathBuf,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: PathBuf::from("grid_snake.log"),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::new(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.game.grid_size, 8);
        assert_eq!(config.game.tick_interval_ms, 350);
        assert_eq!(config.leaderboard.limit, 10);
        assert_eq!(config.leaderboard.endpoint(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("grid_size"));
        assert!(toml.contains("high_score_path"));
    }

    #[test]
    fn test_layered_loading() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/default.toml",
                r#"
                [game]
                grid_size = 12
                tick_interval_ms = 200
                "#,
            )?;
            jail.create_file(
                "config/user.toml",
                r#"
                [game]
                tick_interval_ms = 150
                "#,
            )?;
            jail.set_env("SNAKE_LEADERBOARD__LIMIT", "5");
            jail.set_env("VITE_SUPABASE_URL", "https://example.supabase.co");
            jail.set_env("VITE_SUPABASE_ANON_KEY", "anon");

            let config = AppConfig::load_from("config").expect("config loads");
            assert_eq!(config.game.grid_size, 12);
            assert_eq!(config.game.tick_interval_ms, 150);
            assert_eq!(config.game.fruit_reward, 10);
            assert_eq!(config.leaderboard.limit, 5);
            assert_eq!(
                config.leaderboard.endpoint(),
                Some(("https://example.supabase.co", "anon"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load_from("does-not-exist").expect("defaults load");
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let mut config = AppConfig::default();
        config.game.grid_size = 3;
        assert!(config.validate().is_err());

        config.game.grid_size = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let mut config = AppConfig::default();
        config.game.grid_size = MAX_GRID_SIZE;
        assert!(config.validate().is_ok());

        config.game.grid_size = MAX_GRID_SIZE + 1;
        assert!(config.validate().is_err());

        config.game.grid_size = 16384;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_short_snake() {
        let mut config = AppConfig::default();
        for length in [0, 1, 2] {
            config.game.initial_snake_length = length;
            assert!(config.validate().is_err(), "length {} accepted", length);
        }

        config.game.initial_snake_length = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.leaderboard.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.leaderboard.timeout_secs = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_endpoint_is_unset() {
        let config = LeaderboardConfig {
            url: Some("  ".to_string()),
            anon_key: Some("key".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), None);
    }
}
