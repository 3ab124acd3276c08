// src/config.rs

use std::env;
use std::fmt;
use std::net::SocketAddr;

use dotenvy::dotenv;

/// Number of questions handed out per quiz.
pub const QUIZ_QUESTION_COUNT: usize = 5;

/// Leaderboard size when the client does not ask for one.
pub const LEADERBOARD_DEFAULT_LIMIT: usize = 10;

/// Upper bound for the `limit` query parameter of the leaderboard.
pub const LEADERBOARD_MAX_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` runs the service on in-memory stores.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub log_dir: String,
    /// JSON file of questions inserted at startup.
    pub question_seed_file: Option<String>,
    /// Send `correctAnswer` along with fetched questions (legacy clients).
    pub expose_correct_answers: bool,
}

/// A variable was present but could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}' for {}", self.value, self.key)
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            rust_log: "info".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origin: "http://localhost:5173".to_string(),
            log_dir: "logs".to_string(),
            question_seed_file: None,
            expose_correct_answers: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let defaults = Self::default();

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError {
                key: "BIND_ADDR",
                value: raw,
            })?,
            Err(_) => defaults.bind_addr,
        };

        let expose_correct_answers = match env::var("EXPOSE_CORRECT_ANSWERS") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError {
                key: "EXPOSE_CORRECT_ANSWERS",
                value: raw,
            })?,
            Err(_) => defaults.expose_correct_answers,
        };

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            rust_log: non_empty_var("RUST_LOG").unwrap_or(defaults.rust_log),
            bind_addr,
            cors_origin: non_empty_var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            log_dir: non_empty_var("LOG_DIR").unwrap_or(defaults.log_dir),
            question_seed_file: non_empty_var("QUESTION_SEED_FILE"),
            expose_correct_answers,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
