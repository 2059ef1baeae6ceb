mod config;

pub use config::{BarConfig, Config, ScheduleConfig, SoundsConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory, creating it if needed.
///
/// `FOCUSBAR_CONFIG_DIR` overrides the location outright. Otherwise this is
/// `~/.config/focusbar[-dev]/`, with the `-dev` suffix when
/// `FOCUSBAR_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSBAR_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSBAR_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusbar-dev")
            } else {
                base_dir.join("focusbar")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
