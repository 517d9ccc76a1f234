//! Runtime configuration loaded from the environment (and `.env` when present).

use crate::assistant::ResponseTable;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

pub const ENV_REPLY_DELAY_MS: &str = "CIVICDESK_REPLY_DELAY_MS";
pub const ENV_SUBMIT_DELAY_MS: &str = "CIVICDESK_SUBMIT_DELAY_MS";
pub const ENV_SEED_GREETING: &str = "CIVICDESK_SEED_GREETING";
pub const ENV_RESPONSES: &str = "CIVICDESK_RESPONSES";
pub const ENV_LOG: &str = "CIVICDESK_LOG";
pub const ENV_LOG_JSON: &str = "CIVICDESK_LOG_JSON";

/// Settings for the desk, the chat widget and logging.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeskConfig {
    /// Simulated processing delay before the assistant answers.
    #[validate(range(max = 60000))]
    pub reply_delay_ms: u64,
    /// Simulated latency of a complaint submission.
    #[validate(range(max = 60000))]
    pub submit_delay_ms: u64,
    /// Whether a new conversation opens with the assistant's greeting.
    pub seed_greeting: bool,
    /// Optional JSON file overriding the built-in responses.
    pub responses_path: Option<PathBuf>,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    #[validate(length(min = 1))]
    pub log_level: String,
    /// Emit JSON log lines instead of the human format.
    pub log_json: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            submit_delay_ms: 1500,
            seed_greeting: true,
            responses_path: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl DeskConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// Unset variables keep their default. A `.env` file in the working
    /// directory is loaded first if it exists.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            reply_delay_ms: read_u64(ENV_REPLY_DELAY_MS)?.unwrap_or(defaults.reply_delay_ms),
            submit_delay_ms: read_u64(ENV_SUBMIT_DELAY_MS)?.unwrap_or(defaults.submit_delay_ms),
            seed_greeting: read_bool(ENV_SEED_GREETING)?.unwrap_or(defaults.seed_greeting),
            responses_path: read_var(ENV_RESPONSES).map(PathBuf::from),
            log_level: read_var(ENV_LOG).unwrap_or(defaults.log_level),
            log_json: read_bool(ENV_LOG_JSON)?.unwrap_or(defaults.log_json),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Builds the response table, applying the override file if configured.
    pub fn response_table(&self) -> Result<ResponseTable, AppError> {
        match &self.responses_path {
            Some(path) => ResponseTable::load(path),
            None => Ok(ResponseTable::default()),
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_u64(name: &str) -> Result<Option<u64>, AppError> {
    read_var(name)
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| AppError::Config(format!("{}='{}': {}", name, raw, e)))
        })
        .transpose()
}

fn read_bool(name: &str) -> Result<Option<bool>, AppError> {
    read_var(name)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!("{}='{}' is not a boolean", name, raw))),
        })
        .transpose()
}
