// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use dotenvy::dotenv;

/// Number of questions drawn for one quiz attempt unless overridden.
pub const DEFAULT_QUIZ_QUESTION_COUNT: usize = 10;

/// Idle time after which a quiz session is dropped.
pub const DEFAULT_QUIZ_SESSION_IDLE_SECS: u64 = 60 * 60;

/// Live quiz sessions kept before the least recently used one is evicted.
pub const DEFAULT_QUIZ_SESSION_CAPACITY: usize = 10_000;

/// Attempts recorded before `Total_Questions` existed are assumed to be this long.
pub const LEGACY_TOTAL_QUESTIONS: u32 = 10;

/// Rows kept in the timeline of an exported report.
pub const REPORT_TIMELINE_LIMIT: usize = 50;

pub const RECENT_APPOINTMENTS_LIMIT: usize = 5;
pub const RECENT_THOUGHTS_LIMIT: usize = 10;
pub const TOP_TEACHERS_LIMIT: usize = 3;
pub const ADMIN_RECENT_LIMIT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding every CSV table.
    pub data_dir: PathBuf,
    pub bind_address: SocketAddr,
    pub rust_log: String,
    pub quiz_question_count: usize,
    pub quiz_session_idle: Duration,
    pub quiz_session_capacity: usize,
}

fn positive_var(name: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidValue(
                name.to_string(),
                format!("expected a positive integer, got '{}'", raw),
            )),
        },
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let quiz_question_count =
            positive_var("QUIZ_QUESTION_COUNT", DEFAULT_QUIZ_QUESTION_COUNT as u64)? as usize;
        let quiz_session_idle = Duration::from_secs(positive_var(
            "QUIZ_SESSION_IDLE_SECS",
            DEFAULT_QUIZ_SESSION_IDLE_SECS,
        )?);
        let quiz_session_capacity =
            positive_var("QUIZ_SESSION_CAPACITY", DEFAULT_QUIZ_SESSION_CAPACITY as u64)? as usize;

        Ok(Self {
            data_dir,
            bind_address,
            rust_log,
            quiz_question_count,
            quiz_session_idle,
            quiz_session_capacity,
        })
    }

    /// Configuration rooted at `data_dir` with every other value at its default.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
            rust_log: "error".to_string(),
            quiz_question_count: DEFAULT_QUIZ_QUESTION_COUNT,
            quiz_session_idle: Duration::from_secs(DEFAULT_QUIZ_SESSION_IDLE_SECS),
            quiz_session_capacity: DEFAULT_QUIZ_SESSION_CAPACITY,
        }
    }
}
