//! Configuration Tests
//!
//! Environment-driven settings. Every test pins all variables it depends on,
//! since other tests may run with a different process environment.

use crate::assistant::Category;
use crate::config::{
    DeskConfig, ENV_LOG, ENV_LOG_JSON, ENV_REPLY_DELAY_MS, ENV_RESPONSES, ENV_SEED_GREETING,
    ENV_SUBMIT_DELAY_MS,
};
use crate::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

const ALL_VARS: [&str; 6] = [
    ENV_REPLY_DELAY_MS,
    ENV_SUBMIT_DELAY_MS,
    ENV_SEED_GREETING,
    ENV_RESPONSES,
    ENV_LOG,
    ENV_LOG_JSON,
];

/// Runs `f` with every config variable unset except those in `set`.
fn with_env<R>(set: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let vars: Vec<(&str, Option<&str>)> = ALL_VARS
        .iter()
        .map(|name| {
            let value = set.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(vars, f)
}

#[cfg(test)]
mod from_env_tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = with_env(&[], DeskConfig::from_env).unwrap();

        assert_eq!(config.reply_delay(), Duration::from_secs(1));
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert!(config.seed_greeting);
        assert!(config.responses_path.is_none());
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_values_read_from_env() {
        let config = with_env(
            &[
                (ENV_REPLY_DELAY_MS, "250"),
                (ENV_SUBMIT_DELAY_MS, "0"),
                (ENV_SEED_GREETING, "no"),
                (ENV_RESPONSES, "/etc/civicdesk/responses.json"),
                (ENV_LOG, "civicdesk_core=debug"),
                (ENV_LOG_JSON, "TRUE"),
            ],
            DeskConfig::from_env,
        )
        .unwrap();

        assert_eq!(config.reply_delay_ms, 250);
        assert_eq!(config.submit_delay_ms, 0);
        assert!(!config.seed_greeting);
        assert_eq!(
            config.responses_path,
            Some(PathBuf::from("/etc/civicdesk/responses.json"))
        );
        assert_eq!(config.log_level, "civicdesk_core=debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = with_env(&[(ENV_REPLY_DELAY_MS, "  "), (ENV_LOG, "")], DeskConfig::from_env)
            .unwrap();

        assert_eq!(config.reply_delay_ms, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_number_is_config_error() {
        let result = with_env(&[(ENV_REPLY_DELAY_MS, "soon")], DeskConfig::from_env);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_malformed_bool_is_config_error() {
        let result = with_env(&[(ENV_SEED_GREETING, "maybe")], DeskConfig::from_env);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_out_of_range_delay_is_validation_error() {
        let result = with_env(&[(ENV_SUBMIT_DELAY_MS, "600000")], DeskConfig::from_env);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

#[cfg(test)]
mod response_table_tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_response_table_from_configured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"departments": "Ask at the front desk."}}"#).unwrap();

        let config = DeskConfig {
            responses_path: Some(file.path().to_path_buf()),
            ..DeskConfig::default()
        };
        let table = config.response_table().unwrap();

        assert_eq!(table.get(Category::Departments), "Ask at the front desk.");
    }

    #[test]
    fn test_response_table_defaults_without_file() {
        let table = DeskConfig::default().response_table().unwrap();
        assert!(!table.get(Category::Default).is_empty());
    }
}
