//! TOML-based application configuration.
//!
//! Stores:
//! - Work/break durations and tick cadences
//! - The daily schedule (start time, end hour, lunch window)
//! - Alarm sound assets
//! - Bar colours
//!
//! Configuration is stored at `~/.config/focusbar/config.toml` and read once
//! at startup; the running timer never reloads it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::timer::{ScheduleWindow, TimerSettings};

/// Interval durations and driver cadences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    /// Minutes before the end of a work interval at which the warning sounds.
    #[serde(default = "default_soon_alarm_minutes")]
    pub soon_alarm_minutes: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_schedule_check_interval_ms")]
    pub schedule_check_interval_ms: u64,
}

/// Daily active window and lunch pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// `HH:MM`, 24h.
    #[serde(default = "default_daily_start")]
    pub daily_start: String,
    #[serde(default = "default_daily_end_hour")]
    pub daily_end_hour: u32,
    #[serde(default = "default_lunch_start_hour")]
    pub lunch_start_hour: u32,
    #[serde(default = "default_lunch_end_hour")]
    pub lunch_end_hour: u32,
}

/// Alarm sounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Played when an interval completes. Relative paths resolve against
    /// the configuration directory, then the working directory.
    #[serde(default = "default_alarm_path")]
    pub alarm_path: String,
    /// Played shortly before a work interval ends.
    #[serde(default = "default_soon_path")]
    pub soon_path: String,
    /// Player command; empty means probe `paplay`, `aplay`, `afplay`.
    #[serde(default)]
    pub player: String,
}

/// Bar appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    #[serde(default = "default_work_color")]
    pub work_color: String,
    #[serde(default = "default_break_color")]
    pub break_color: String,
    #[serde(default = "default_idle_color")]
    pub idle_color: String,
    /// Bar width in columns; 0 follows the terminal width.
    #[serde(default)]
    pub width: u16,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusbar/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub sounds: SoundsConfig,
    #[serde(default)]
    pub bar: BarConfig,
}

// Default functions
fn default_work_minutes() -> u64 {
    50
}
fn default_break_minutes() -> u64 {
    10
}
fn default_soon_alarm_minutes() -> u64 {
    5
}
fn default_tick_interval_ms() -> u64 {
    100
}
fn default_schedule_check_interval_ms() -> u64 {
    30_000
}
fn default_daily_start() -> String {
    "07:00".into()
}
fn default_daily_end_hour() -> u32 {
    17
}
fn default_lunch_start_hour() -> u32 {
    11
}
fn default_lunch_end_hour() -> u32 {
    13
}
fn default_true() -> bool {
    true
}
fn default_alarm_path() -> String {
    "sounds/alarm.wav".into()
}
fn default_soon_path() -> String {
    "sounds/soon.wav".into()
}
fn default_work_color() -> String {
    "#ffa500".into()
}
fn default_break_color() -> String {
    "#90ee90".into()
}
fn default_idle_color() -> String {
    "#d3d3d3".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            soon_alarm_minutes: default_soon_alarm_minutes(),
            tick_interval_ms: default_tick_interval_ms(),
            schedule_check_interval_ms: default_schedule_check_interval_ms(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_start: default_daily_start(),
            daily_end_hour: default_daily_end_hour(),
            lunch_start_hour: default_lunch_start_hour(),
            lunch_end_hour: default_lunch_end_hour(),
        }
    }
}

impl Default for SoundsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alarm_path: default_alarm_path(),
            soon_path: default_soon_path(),
            player: String::new(),
        }
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            work_color: default_work_color(),
            break_color: default_break_color(),
            idle_color: default_idle_color(),
            width: 0,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the existing type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as the key's type. Nothing is written to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(())
    }

    /// Validate and convert into the immutable settings the engine runs on.
    pub fn timer_settings(&self) -> Result<TimerSettings, ConfigError> {
        let daily_start = NaiveTime::parse_from_str(self.schedule.daily_start.trim(), "%H:%M")
            .map_err(|_| ValidationError::InvalidTimeOfDay {
                field: "schedule.daily_start".into(),
                value: self.schedule.daily_start.clone(),
            })?;

        let settings = TimerSettings {
            work_duration: minutes(self.timer.work_minutes),
            break_duration: minutes(self.timer.break_minutes),
            soon_threshold: minutes(self.timer.soon_alarm_minutes),
            tick_interval: Duration::from_millis(self.timer.tick_interval_ms),
            schedule_check_interval: Duration::from_millis(self.timer.schedule_check_interval_ms),
            window: ScheduleWindow {
                daily_start,
                daily_end_hour: self.schedule.daily_end_hour,
                lunch_start_hour: self.schedule.lunch_start_hour,
                lunch_end_hour: self.schedule.lunch_end_hour,
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn minutes(m: u64) -> Duration {
    Duration::from_secs(m.saturating_mul(60))
}
