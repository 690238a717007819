use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::wheel::{
    WheelConfig, DEFAULT_BASE_DELAY_MS, DEFAULT_FULL_ROTATIONS, DEFAULT_RADIUS, DEFAULT_TICK_MS,
};

const DEFAULT_FRAME_MS: u64 = 16; // ~60 FPS
const MAX_TICK_MS: u64 = 10_000;
const MAX_RADIUS: u64 = 100;
const MAX_ROTATIONS: u64 = 100;
const MAX_BASE_DELAY_MS: u64 = 600_000;
const MAX_FRAME_MS: u64 = 1_000;
const LOG_FILE_NAME: &str = "random-picker.log";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    pub wheel: WheelConfig,
    pub frame_rate_ms: u64,
    pub seed: Option<u64>,
    pub log_path: PathBuf,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            wheel: WheelConfig::default(),
            frame_rate_ms: DEFAULT_FRAME_MS,
            seed: None,
            log_path: default_log_path(),
        }
    }
}

impl PickerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_ms: u64 = parse(&lookup, "PICKER_TICK_MS", DEFAULT_TICK_MS)?;
        let radius: usize = parse(&lookup, "PICKER_RADIUS", DEFAULT_RADIUS)?;
        let full_rotations: u32 = parse(&lookup, "PICKER_ROTATIONS", DEFAULT_FULL_ROTATIONS)?;
        let base_delay_ms: u64 = parse(&lookup, "PICKER_BASE_DELAY_MS", DEFAULT_BASE_DELAY_MS)?;
        let frame_rate_ms: u64 = parse(&lookup, "PICKER_FRAME_MS", DEFAULT_FRAME_MS)?;

        in_range("PICKER_TICK_MS", tick_ms, 1, MAX_TICK_MS)?;
        in_range("PICKER_RADIUS", radius as u64, 1, MAX_RADIUS)?;
        in_range("PICKER_ROTATIONS", u64::from(full_rotations), 0, MAX_ROTATIONS)?;
        in_range("PICKER_BASE_DELAY_MS", base_delay_ms, 0, MAX_BASE_DELAY_MS)?;
        in_range("PICKER_FRAME_MS", frame_rate_ms, 1, MAX_FRAME_MS)?;

        let seed = match lookup("PICKER_SEED") {
            Some(raw) => Some(parse_value("PICKER_SEED", &raw)?),
            None => None,
        };
        let log_path = lookup("PICKER_LOG").map(PathBuf::from).unwrap_or_else(default_log_path);

        Ok(Self {
            wheel: WheelConfig {
                tick: Duration::from_millis(tick_ms),
                radius,
                full_rotations,
                base_delay: Duration::from_millis(base_delay_ms),
            },
            frame_rate_ms,
            seed,
            log_path,
        })
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn in_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    let reason = if value < min {
        format!("must be at least {min}")
    } else if value > max {
        format!("must be at most {max}")
    } else {
        return Ok(());
    };
    Err(ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason,
    })
}

fn default_log_path() -> PathBuf {
    // Log next to the executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(LOG_FILE_NAME);
        }
    }
    PathBuf::from(LOG_FILE_NAME)
}
