use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{self, File};

use crate::config::DebugConfig;

/// Send log output to the configured file.
///
/// The terminal is owned by the game while it runs, so nothing is logged to
/// stdout or stderr. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &DebugConfig) -> Result<()> {
    if let Some(parent) = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;

    Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;

    log::info!("logging to {}", config.log_file.display());
    Ok(())
}
